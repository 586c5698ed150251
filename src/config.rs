//! Configuration
//!
//! User defaults live in ~/.config/cdjexport/config.json. Each export run gets
//! an explicit [`ExportConfig`] built from those defaults and the CLI flags.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the catalog location
pub const CATALOG_ENV: &str = "CDJEXPORT_CATALOG";

/// Settings for a single export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Root of the export media (USB stick mount point)
    pub output_root: PathBuf,
    /// Verbose per-track reporting
    pub debug: bool,
    /// Report what would be copied without touching the media
    pub dry_run: bool,
}

/// Persistent user defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Rekordbox collection XML used when `--catalog` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Export root used when `--output` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_output: Option<PathBuf>,
}

impl AppConfig {
    /// Load the config from the user config directory
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save the config to the user config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Load from an explicit path, falling back to defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Self =
            serde_json::from_str(&contents).with_context(|| "Failed to parse config")?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("cdjexport").join("config.json"))
    }

    /// Pick the catalog: explicit flag/env value first, then the saved default
    pub fn resolve_catalog(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        explicit.or_else(|| self.catalog_path.clone()).ok_or_else(|| {
            anyhow::anyhow!(
                "No catalog given. Pass --catalog, set {}, or run 'cdjexport config --catalog <PATH>'.",
                CATALOG_ENV
            )
        })
    }

    /// Pick the export root: explicit flag first, then the saved default
    pub fn resolve_output(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        explicit.or_else(|| self.default_output.clone()).ok_or_else(|| {
            anyhow::anyhow!(
                "No output directory given. Pass --output or run 'cdjexport config --output <DIR>'."
            )
        })
    }
}
