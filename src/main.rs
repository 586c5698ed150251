//! cdjexport - Export playlists to USB media for CDJ players

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug_logging() {
        "cdjexport=debug"
    } else {
        "cdjexport=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Export {
            playlist,
            output,
            debug,
            dry_run,
            catalog,
        } => {
            cli::commands::export(playlist, output, debug, dry_run, catalog).await?;
        }
        Commands::Playlists { catalog } => {
            cli::commands::playlists(catalog)?;
        }
        Commands::Config { catalog, output } => {
            cli::commands::config(catalog, output)?;
        }
        Commands::Completion { shell } => {
            cli::commands::completion(shell);
        }
    }

    Ok(())
}
