//! CLI module for cdjexport

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod progress;

pub use progress::ProgressBarSink;

#[derive(Parser, Debug)]
#[command(name = "cdjexport", about = "Export playlists to USB media for CDJ players")]
#[command(version, author)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a playlist to USB media
    Export {
        /// Playlist name (exact match); prompts for one if omitted
        #[arg(short, long)]
        playlist: Option<String>,

        /// Root of the USB media
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Show per-track details
        #[arg(short, long)]
        debug: bool,

        /// Show what would be copied without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Rekordbox collection XML export
        #[arg(long, env = "CDJEXPORT_CATALOG", value_name = "PATH")]
        catalog: Option<PathBuf>,
    },

    /// List playlists available in the catalog
    Playlists {
        /// Rekordbox collection XML export
        #[arg(long, env = "CDJEXPORT_CATALOG", value_name = "PATH")]
        catalog: Option<PathBuf>,
    },

    /// Show or change saved defaults
    Config {
        /// Default catalog path
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,

        /// Default export root
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

impl Cli {
    /// Whether debug-level logging was requested
    pub fn debug_logging(&self) -> bool {
        self.verbose || matches!(self.command, Commands::Export { debug: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from([
            "cdjexport",
            "export",
            "-p",
            "Friday Set",
            "-o",
            "/media/usb",
            "-d",
            "--catalog",
            "rekordbox.xml",
        ])
        .unwrap();

        assert!(cli.debug_logging());
        match cli.command {
            Commands::Export {
                playlist,
                output,
                dry_run,
                catalog,
                ..
            } => {
                assert_eq!(playlist.as_deref(), Some("Friday Set"));
                assert_eq!(output, Some(PathBuf::from("/media/usb")));
                assert!(!dry_run);
                assert_eq!(catalog, Some(PathBuf::from("rekordbox.xml")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["cdjexport", "playlists", "--catalog", "a.xml", "-v"]).unwrap();
        assert!(cli.debug_logging());
    }
}
