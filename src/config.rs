//! Configuration for the daylog CLI and embedding applications
//!
//! A `LoggerConfig` can come from `~/.daylog/config.toml` or be built in
//! code; every field has a default so a partial file (or none at all) works.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::level::LogLevel;

/// Default number of most-recently-modified log files kept by pruning
pub const DEFAULT_RETAINED_FILES: usize = 5;

/// Default timestamp format, rendered like `2024-01-15 14:30:00 +0100`
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Default time zone used to render timestamps
pub const DEFAULT_TIMEZONE: Tz = Tz::Europe__Berlin;

/// Logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Directory the daily log files are written to
    #[serde(default = "logs_dir")]
    pub directory: PathBuf,

    /// Minimum severity a message needs to be written
    #[serde(default = "default_threshold")]
    pub threshold: LogLevel,

    /// How many log files pruning keeps
    #[serde(default = "default_retained_files")]
    pub retained_files: usize,

    /// chrono strftime string for the timestamp prefix
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// IANA time zone the timestamps are rendered in
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

fn default_threshold() -> LogLevel {
    LogLevel::Debug
}

fn default_retained_files() -> usize {
    DEFAULT_RETAINED_FILES
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_timezone() -> Tz {
    DEFAULT_TIMEZONE
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            directory: logs_dir(),
            threshold: default_threshold(),
            retained_files: default_retained_files(),
            date_format: default_date_format(),
            timezone: default_timezone(),
        }
    }
}

impl LoggerConfig {
    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = config_file_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = config_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content).context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the base configuration directory (~/.daylog)
/// Falls back to ./.daylog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".daylog"))
        .unwrap_or_else(|| {
            tracing::warn!("Could not determine home directory, using current directory");
            PathBuf::from(".daylog")
        })
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the default logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}
