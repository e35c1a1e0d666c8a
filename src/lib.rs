//! # Loggable
//!
//! Date-stamped log files per category, with day-based retention.
//!
//! ## Features
//!
//! - One file per category per day: `<dir>/<prefix>-<YYYY-MM-DD>.<ext>`
//! - Severity-leveled logger facade backed by `tracing-subscriber`
//! - Retention sweep deleting files older than a number of days
//! - Categories declared in code or loaded with `serde`
//!
//! ## Example
//!
//! ```rust,no_run
//! use loggable::LogCategory;
//!
//! let errors = LogCategory::new("/var/log/app", "errors", "errors").with_max_log_days(7);
//!
//! let logger = errors.logger()?;
//! logger.error("payment gateway timed out");
//!
//! let deleted = errors.clear_old_logs()?;
//! # let _ = deleted;
//! # Ok::<(), loggable::Error>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod logger;
pub mod naming;
pub mod retention;
pub mod tracing_init;
pub mod writer;

pub use builder::CategoryBuilder;
pub use config::{
    DEFAULT_EXTENSION, DEFAULT_MAX_LOG_DAYS, DiagnosticsConfig, LineFormat, LogCategory,
};
pub use error::{Error, Result};
pub use logger::{CategoryLogger, Context, Severity};
pub use naming::{LogFileNamer, today};
pub use retention::{RetentionSweeper, SweepReport};
pub use tracing_init::init_logging;
pub use writer::DailyFileWriter;

use std::path::PathBuf;

/// Create a [`CategoryBuilder`] for files named `<file_prefix>-<date>.log` in `directory`.
pub fn category(directory: impl Into<PathBuf>, file_prefix: impl Into<String>) -> CategoryBuilder {
    CategoryBuilder::new(directory, file_prefix)
}
