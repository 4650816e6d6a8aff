//! Tracing subscriber setup for applications embedding the library.

mod init;
pub use init::{init_logging, parse_rotation};

use std::path::PathBuf;

use tracing::Level;
use tracing_appender::rolling::Rotation;

use crate::config::LoggingSection;

/// Log filename inside the log directory.
pub const LOG_FILENAME: &str = "movable.log";

/// Configuration for the logging system.
pub struct LogConfig {
    pub log_dir: PathBuf,
    /// Level used when `RUST_LOG` is not set
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}

fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".movable")
        .join("logs")
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}

impl From<&LoggingSection> for LogConfig {
    /// Unknown level names fall back to `INFO`.
    fn from(section: &LoggingSection) -> Self {
        Self {
            log_dir: section.dir.clone().unwrap_or_else(default_log_dir),
            log_level: section.level.parse().unwrap_or(Level::INFO),
            json_format: section.json,
            rotation: parse_rotation(&section.rotation),
        }
    }
}

#[cfg(test)]
#[path = "../logging_tests.rs"]
mod logging_tests;
