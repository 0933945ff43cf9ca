// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for persistent data (graph document)
    pub data_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: directories::ProjectDirs::from("org", "hyperpolymath", "routeyard")
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("~/.local/share/routeyard")),
            log_level: "info".to_string(),
        }
    }
}

/// Load configuration from config.toml in the platform config directory,
/// falling back to defaults when absent
pub fn load() -> Result<Config> {
    let config_path = directories::ProjectDirs::from("org", "hyperpolymath", "routeyard")
        .map(|d| d.config_dir().join("config.toml"));

    match config_path {
        Some(path) if path.exists() => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))
        }
        _ => Ok(Config::default()),
    }
}

/// Resolve the data directory: explicit override, then ROUTEYARD_DATA_DIR,
/// then the configured default
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }

    if let Ok(dir) = std::env::var("ROUTEYARD_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    Ok(load()?.data_dir)
}
