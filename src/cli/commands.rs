//! CLI command handlers

use anyhow::{Context, Result};
use cdjexport::catalog::{format_playlist_listing, PlaylistSource, RekordboxXml};
use cdjexport::config::{AppConfig, ExportConfig};
use cdjexport::export::{ExportOutcome, ExportSummary, Exporter};
use clap_complete::generate;
use colored::Colorize;
use dialoguer::Select;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use super::ProgressBarSink;

/// Open the catalog, failing the whole command if it can't be read
fn connect(path: &Path) -> Result<RekordboxXml> {
    let catalog = RekordboxXml::open(path)
        .with_context(|| format!("Failed to connect to catalog {}", path.display()))?;
    info!("Connected to catalog {}", path.display());
    Ok(catalog)
}

/// Handle the `export` command
pub async fn export(
    playlist: Option<String>,
    output: Option<PathBuf>,
    debug: bool,
    dry_run: bool,
    catalog: Option<PathBuf>,
) -> Result<()> {
    let app_config = AppConfig::load()?;
    let catalog_path = app_config.resolve_catalog(catalog)?;
    let output_root = app_config.resolve_output(output)?;

    let source = connect(&catalog_path)?;

    let playlist = match playlist {
        Some(name) => name,
        None => select_playlist(&source)?,
    };

    println!(
        "Exporting {} to {}",
        playlist.green(),
        output_root.display()
    );

    let exporter = Exporter::new(
        source,
        ExportConfig {
            output_root,
            debug,
            dry_run,
        },
    );
    let sink = ProgressBarSink::new();

    match exporter.export(&playlist, &sink).await? {
        ExportOutcome::Completed(summary) => print_summary(&summary),
        ExportOutcome::PlaylistNotFound { name } => {
            println!("{}", format!("Playlist '{}' not found.", name).yellow());
            println!("Run {} to see available playlists.", "cdjexport playlists".cyan());
        }
    }

    Ok(())
}

/// Prompt for a playlist when none was given on the command line
fn select_playlist(source: &RekordboxXml) -> Result<String> {
    let playlists = source.playlists()?;
    if playlists.is_empty() {
        anyhow::bail!("The catalog has no playlists");
    }

    let names: Vec<&str> = playlists.iter().map(|p| p.name.as_str()).collect();
    let index = Select::new()
        .with_prompt("Playlist to export")
        .items(&names)
        .default(0)
        .interact()
        .context("No playlist selected")?;

    Ok(playlists[index].name.clone())
}

fn print_summary(summary: &ExportSummary) {
    println!();
    if summary.dry_run {
        println!("{}", "[DRY RUN] Nothing was written.".yellow());
    } else {
        println!("{}", "Export complete!".green().bold());
    }
    println!("  Playlist: {}", summary.playlist);
    println!("  Tracks: {}", summary.total);
    println!("  Copied: {}", summary.copied);
    if summary.skipped > 0 {
        println!("  Skipped (missing): {}", summary.skipped.to_string().yellow());
    }
    if summary.failed > 0 {
        println!("  Failed: {}", summary.failed.to_string().red());
        for failure in &summary.failures {
            println!(
                "    #{} {}: {}",
                failure.position + 1,
                failure.source.display(),
                failure.message.red()
            );
        }
    }
    println!(
        "  Total size: {:.1} MB",
        summary.bytes_copied as f64 / 1_048_576.0
    );
}

/// Handle the `playlists` command
pub fn playlists(catalog: Option<PathBuf>) -> Result<()> {
    let app_config = AppConfig::load()?;
    let source = connect(&app_config.resolve_catalog(catalog)?)?;
    let playlists = source.playlists()?;

    println!();
    println!("{}", "Available playlists:".green().bold());
    print!("{}", format_playlist_listing(&playlists));

    Ok(())
}

/// Handle the `config` command
pub fn config(catalog: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let mut app_config = AppConfig::load()?;

    if catalog.is_some() || output.is_some() {
        if let Some(path) = catalog {
            app_config.catalog_path = Some(path);
        }
        if let Some(dir) = output {
            app_config.default_output = Some(dir);
        }
        app_config.save()?;
        println!("{}", "Configuration saved.".green());
    }

    let show = |value: &Option<PathBuf>| {
        value
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".dimmed().to_string())
    };

    println!("  Config file: {}", AppConfig::config_path()?.display());
    println!("  Catalog: {}", show(&app_config.catalog_path));
    println!("  Output: {}", show(&app_config.default_output));

    Ok(())
}

/// Handle the `completion` command
pub fn completion(shell: clap_complete::Shell) {
    let mut cmd = <super::Cli as clap::CommandFactory>::command();
    generate(shell, &mut cmd, "cdjexport", &mut io::stdout());
}
