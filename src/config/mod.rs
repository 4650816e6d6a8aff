//! Library configuration loaded from `~/.movable/config.toml`.
//!
//! The file is optional; every section and field falls back to its
//! `Default` value when absent.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::movable::validation::NewPositionRule;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

fn default_key_prefix() -> String {
    "movable".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

/// `[cache]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    /// Namespace prepended to every collection cache key
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
        }
    }
}

/// `[validation]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ValidationSection {
    #[serde(default)]
    pub new_position_rule: NewPositionRule,
}

/// `[logging]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Level name understood by `tracing::Level`
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    /// daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
    /// Log directory; `~/.movable/logs` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            rotation: default_rotation(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovableConfig {
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub validation: ValidationSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl MovableConfig {
    /// Cache key for the collection `name`, namespaced by `[cache] key_prefix`.
    #[must_use]
    pub fn cache_key(&self, name: &str) -> String {
        if self.cache.key_prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}:{name}", self.cache.key_prefix)
        }
    }
}

/// Canonical config location (`~/.movable/config.toml`).
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".movable").join("config.toml"))
}

/// Load the configuration from `~/.movable/config.toml`.
///
/// Returns defaults when the home directory is unknown or the file does not
/// exist.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_config() -> Result<MovableConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory; using default config");
        return Ok(MovableConfig::default());
    };
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(MovableConfig::default());
    }
    load_config_from(&path)
}

/// Load the configuration from an explicit file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load_config_from(path: &Path) -> Result<MovableConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: MovableConfig = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}
