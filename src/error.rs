//! Error taxonomy for the logger
//!
//! Construction and write failures are surfaced as distinct variants so
//! callers can tell an unopenable file apart from a failed write. Nothing is
//! retried; the caller decides what to do next.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Error, Debug)]
pub enum LoggerError {
    /// The log file could not be opened or created
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log file exists but is not writable, or an append failed
    #[error("failed to write log file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An unrecognized level name was passed
    #[error("unknown log level: {0}")]
    InvalidLevel(String),

    /// An unrecognized IANA time zone name was passed
    #[error("unknown time zone: {0}")]
    InvalidTimezone(String),

    /// A retention count that would prune the current-day file was passed
    #[error("retention count must be at least 1, got {0}")]
    InvalidRetention(usize),

    /// The log directory could not be created or scanned during pruning
    #[error("failed to access log directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
