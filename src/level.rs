//! Severity levels
//!
//! The eight syslog-style levels, ordered by rank: a lower rank is more
//! severe. A message is emitted when its rank is at or below the configured
//! threshold's rank.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;

/// Log severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

/// All levels, most severe first
pub const ALL_LEVELS: [LogLevel; 8] = [
    LogLevel::Emergency,
    LogLevel::Alert,
    LogLevel::Critical,
    LogLevel::Error,
    LogLevel::Warning,
    LogLevel::Notice,
    LogLevel::Info,
    LogLevel::Debug,
];

impl LogLevel {
    /// Numeric rank, 0 (emergency) through 7 (debug)
    pub fn rank(&self) -> u8 {
        match self {
            LogLevel::Emergency => 0,
            LogLevel::Alert => 1,
            LogLevel::Critical => 2,
            LogLevel::Error => 3,
            LogLevel::Warning => 4,
            LogLevel::Notice => 5,
            LogLevel::Info => 6,
            LogLevel::Debug => 7,
        }
    }

    /// Uppercase display name as written into log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Emergency => "EMERGENCY",
            LogLevel::Alert => "ALERT",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Notice => "NOTICE",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Check whether a message at this level passes the given threshold
    pub fn passes(&self, threshold: LogLevel) -> bool {
        self.rank() <= threshold.rank()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    /// Parse a level name, case-insensitively
    ///
    /// Unrecognized names are rejected with [`LoggerError::InvalidLevel`]
    /// rather than mapped to a fallback level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "emergency" => Ok(LogLevel::Emergency),
            "alert" => Ok(LogLevel::Alert),
            "critical" => Ok(LogLevel::Critical),
            "error" => Ok(LogLevel::Error),
            "warning" => Ok(LogLevel::Warning),
            "notice" => Ok(LogLevel::Notice),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_are_ordered() {
        for pair in ALL_LEVELS.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
        assert_eq!(LogLevel::Emergency.rank(), 0);
        assert_eq!(LogLevel::Debug.rank(), 7);
    }

    #[test]
    fn test_passes_threshold() {
        assert!(LogLevel::Error.passes(LogLevel::Debug));
        assert!(LogLevel::Debug.passes(LogLevel::Debug));
        assert!(!LogLevel::Debug.passes(LogLevel::Error));
        assert!(LogLevel::Emergency.passes(LogLevel::Emergency));
        assert!(!LogLevel::Info.passes(LogLevel::Warning));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("Notice".parse::<LogLevel>().unwrap(), LogLevel::Notice);
    }

    #[test]
    fn test_parse_unknown_level_fails() {
        let err = "verbose".parse::<LogLevel>().unwrap_err();
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn test_display_is_uppercase() {
        assert_eq!(LogLevel::Emergency.to_string(), "EMERGENCY");
        assert_eq!(format!("{}", LogLevel::Info), "INFO");
    }
}
