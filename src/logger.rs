//! The file logger
//!
//! A `FileLogger` owns an append-mode handle to one daily log file. It is
//! synchronous and single-threaded: every call formats, writes and flushes
//! before returning, and the handle is closed when the logger is dropped.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use chrono_tz::Tz;

use crate::config::{LoggerConfig, DEFAULT_DATE_FORMAT, DEFAULT_RETAINED_FILES, DEFAULT_TIMEZONE};
use crate::context::{render_context, Context};
use crate::error::{LoggerError, Result};
use crate::level::LogLevel;
use crate::retention::{remove_obsolete_logfiles, LOG_FILE_PREFIX};

/// Generate the log file path for today's date
///
/// The date comes from the local system clock at call time; a logger keeps
/// the path it was constructed with even if the process runs past midnight.
pub fn current_log_file_path(directory: &Path) -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    directory.join(format!("{}{}.txt", LOG_FILE_PREFIX, date))
}

/// Logger writing to one file per calendar day
///
/// Construction creates the directory, opens (or creates) today's file in
/// append mode and prunes old log files down to the retention count. Two
/// loggers pointed at the same directory are not coordinated beyond the
/// OS append semantics of the underlying file.
#[derive(Debug)]
pub struct FileLogger {
    directory: PathBuf,
    path: PathBuf,
    threshold: LogLevel,
    date_format: String,
    timezone: Tz,
    file: File,
}

impl FileLogger {
    /// Open a logger in `directory` with default threshold and retention
    pub fn new(directory: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(directory, LogLevel::Debug, DEFAULT_RETAINED_FILES)
    }

    /// Open a logger with an explicit threshold and retention count
    pub fn with_options(
        directory: impl AsRef<Path>,
        threshold: LogLevel,
        retained_files: usize,
    ) -> Result<Self> {
        // Pruning keeps the retained count of files, and the current-day
        // file must always be among them.
        if retained_files == 0 {
            return Err(LoggerError::InvalidRetention(retained_files));
        }

        let directory = normalize_directory(directory.as_ref());

        fs::create_dir_all(&directory).map_err(|source| LoggerError::Directory {
            path: directory.clone(),
            source,
        })?;

        let path = current_log_file_path(&directory);
        let existed = path.exists();

        // An existing read-only file would only fail at the first write;
        // surface it at construction instead. The mode-bit check catches
        // files root could still open for writing.
        if let Ok(metadata) = fs::metadata(&path) {
            if metadata.permissions().readonly() {
                return Err(LoggerError::Write {
                    path,
                    source: std::io::Error::new(
                        std::io::ErrorKind::PermissionDenied,
                        "log file is read-only",
                    ),
                });
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| classify_open_error(existed, path.clone(), source))?;

        remove_obsolete_logfiles(&directory, retained_files)?;

        tracing::debug!(path = %path.display(), "opened daily log file");

        Ok(Self {
            directory,
            path,
            threshold,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            timezone: DEFAULT_TIMEZONE,
            file,
        })
    }

    /// Open a logger from a [`LoggerConfig`]
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let mut logger =
            Self::with_options(&config.directory, config.threshold, config.retained_files)?;
        logger.set_date_format(config.date_format.clone());
        logger.set_timezone(config.timezone);
        Ok(logger)
    }

    /// Log a message at the given level
    ///
    /// Below-threshold messages are a complete no-op: nothing is formatted
    /// and nothing is written.
    pub fn log(&mut self, level: LogLevel, message: &str, context: &Context) -> Result<()> {
        if !level.passes(self.threshold) {
            return Ok(());
        }
        let line = self.format_message(level, message, context);
        self.write(&line)
    }

    /// Log at emergency level
    pub fn emergency(&mut self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Emergency, message, context)
    }

    /// Log at alert level
    pub fn alert(&mut self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Alert, message, context)
    }

    /// Log at critical level
    pub fn critical(&mut self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Critical, message, context)
    }

    /// Log at error level
    pub fn error(&mut self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Error, message, context)
    }

    /// Log at warning level
    pub fn warning(&mut self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Warning, message, context)
    }

    /// Log at notice level
    pub fn notice(&mut self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Notice, message, context)
    }

    /// Log at info level
    pub fn info(&mut self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Info, message, context)
    }

    /// Log at debug level
    pub fn debug(&mut self, message: &str, context: &Context) -> Result<()> {
        self.log(LogLevel::Debug, message, context)
    }

    /// Format a message into the line that would be written
    ///
    /// The timestamp is rendered at call time in the configured time zone,
    /// so setter changes apply to subsequent lines only.
    pub fn format_message(&self, level: LogLevel, message: &str, context: &Context) -> String {
        let timestamp = Local::now()
            .with_timezone(&self.timezone)
            .format(&self.date_format);
        let mut line = format!("[{}] [{}] {}", timestamp, level, message);
        if !context.is_empty() {
            line.push('\n');
            line.push_str(&render_context(context));
        }
        line.push('\n');
        line
    }

    /// Append a formatted line and flush it to the OS
    fn write(&mut self, formatted: &str) -> Result<()> {
        self.file
            .write_all(formatted.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(|source| LoggerError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Change the minimum severity for subsequent calls
    pub fn set_threshold(&mut self, threshold: LogLevel) {
        self.threshold = threshold;
    }

    /// Change the timestamp format for subsequent calls
    pub fn set_date_format(&mut self, date_format: impl Into<String>) {
        self.date_format = date_format.into();
    }

    /// Change the time zone for subsequent calls
    pub fn set_timezone(&mut self, timezone: Tz) {
        self.timezone = timezone;
    }

    /// Change the time zone by IANA name, e.g. `America/New_York`
    pub fn set_timezone_name(&mut self, name: &str) -> Result<()> {
        let tz: Tz = name
            .parse()
            .map_err(|_| LoggerError::InvalidTimezone(name.to_string()))?;
        self.timezone = tz;
        Ok(())
    }

    /// Path of the file this logger writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory this logger writes into
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Current minimum severity
    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }
}

/// Strip trailing separators so `logs/` and `logs` name the same directory
fn normalize_directory(directory: &Path) -> PathBuf {
    directory.components().collect()
}

/// Sort an append-open failure into the error taxonomy
///
/// A pre-existing file the current user may not write to is a write error;
/// everything else (missing path, exhausted descriptors, a brand-new file
/// that cannot be created) is an open error.
fn classify_open_error(existed: bool, path: PathBuf, source: std::io::Error) -> LoggerError {
    if existed && source.kind() == std::io::ErrorKind::PermissionDenied {
        LoggerError::Write { path, source }
    } else {
        LoggerError::Open { path, source }
    }
}
