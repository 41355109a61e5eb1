//! Provider configuration (from .ram-load.toml)

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// File name searched for from the working directory upwards
pub const CONFIG_FILENAME: &str = ".ram-load.toml";

/// Directory under the platform config dir holding the global `config.toml`
pub const APP_DIR: &str = "ram-load";

/// Polling floor, in milliseconds
pub const MIN_INTERVAL_MS: u64 = 100;

fn default_interval_ms() -> u64 {
    2000
}

/// How readings are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `key=value` pairs on one line
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RamLoadConfig {
    /// Delay between refreshes
    pub interval_ms: u64,
    /// Output line format
    pub format: OutputFormat,
    /// Render byte counts as GiB/MiB in text output
    pub human_readable: bool,
}

impl Default for RamLoadConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            format: OutputFormat::default(),
            human_readable: false,
        }
    }
}

impl RamLoadConfig {
    /// Load config from .ram-load.toml
    ///
    /// Search order:
    /// 1. Walk up directory tree from cwd looking for .ram-load.toml
    /// 2. Check `<config_dir>/ram-load/config.toml` (global fallback)
    /// 3. Fall back to defaults
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        if let Some(path) = provider_common::find_config_file(&cwd, CONFIG_FILENAME, APP_DIR) {
            tracing::debug!("Loading config from: {}", path.display());
            return Self::load_from_path(&path);
        }

        tracing::debug!("No {} found, using defaults", CONFIG_FILENAME);
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        provider_common::load_toml(path)
    }

    /// Apply command line / environment overrides on top of the file values
    pub fn with_overrides(
        mut self,
        interval_ms: Option<u64>,
        format: Option<OutputFormat>,
        human_readable: bool,
    ) -> Self {
        if let Some(interval_ms) = interval_ms {
            self.interval_ms = interval_ms;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self.human_readable |= human_readable;
        self
    }

    /// Refresh interval in milliseconds, never shorter than [`MIN_INTERVAL_MS`]
    pub fn effective_interval_ms(&self) -> u64 {
        self.interval_ms.max(MIN_INTERVAL_MS)
    }

    /// Refresh interval, never shorter than [`MIN_INTERVAL_MS`]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.effective_interval_ms())
    }
}
