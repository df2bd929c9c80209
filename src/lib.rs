//! daylog - minimal daily-file logger
//!
//! One file per calendar day, severity filtering against a threshold,
//! structured context rendered as an indented block, and count-based
//! retention pruning at construction time.
//!
//! ```no_run
//! use daylog::{context, FileLogger, LogLevel};
//!
//! let mut logger = FileLogger::with_options("logs", LogLevel::Info, 5)?;
//! logger.info("user logged in", &context! { "user" => "alice" })?;
//! # Ok::<(), daylog::LoggerError>(())
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod level;
pub mod logger;
pub mod retention;

pub use config::LoggerConfig;
pub use context::{render_context, Context};
pub use error::{LoggerError, Result};
pub use level::LogLevel;
pub use logger::FileLogger;
pub use retention::remove_obsolete_logfiles;
