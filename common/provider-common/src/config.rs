//! Configuration file discovery and loading

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Find a config file by walking up the directory tree, then checking global config.
///
/// Search order:
/// 1. `start` and its parent directories (walking up to root) for `filename`
/// 2. Global config at `<config_dir>/<app_dir>/config.toml`
///
/// Returns the path if found, None otherwise.
pub fn find_config_file(start: &Path, filename: &str, app_dir: &str) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(filename);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    // Fallback: Check global config
    let global_path = dirs::config_dir()?.join(app_dir).join("config.toml");
    if global_path.is_file() {
        return Some(global_path);
    }

    None
}

/// Load and parse a TOML file into `T`
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("parsing config TOML {}", path.display()))?;
    Ok(config)
}
