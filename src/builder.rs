//! Builder pattern for declaring a log category.
//!
//! This module provides a fluent API for describing a category and acquiring
//! its logger in a single chain of method calls.
//!
//! # Example
//!
//! ```rust,no_run
//! // Daily files under /var/log/shop named orders-YYYY-MM-DD.log, kept 14 days
//! let logger = loggable::category("/var/log/shop", "orders")
//!     .with_logger_name("orders")
//!     .with_max_log_days(14)
//!     .logger()
//!     .expect("Failed to open order log");
//!
//! logger.info("order accepted");
//! ```

use std::path::PathBuf;

use crate::{CategoryLogger, LineFormat, LogCategory, Result, RetentionSweeper};

/// A builder for log categories.
///
/// The logger name defaults to the file prefix.
#[derive(Debug, Clone)]
pub struct CategoryBuilder {
    category: LogCategory,
}

impl CategoryBuilder {
    /// Start a category writing `<prefix>-<date>.log` files into `directory`.
    pub fn new(directory: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        let file_prefix = file_prefix.into();
        Self {
            category: LogCategory::new(directory, file_prefix.clone(), file_prefix),
        }
    }

    /// Create a CategoryBuilder from an existing category.
    pub fn from_category(category: LogCategory) -> Self {
        Self { category }
    }

    /// Set the name the logger identifies itself with.
    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.category.logger_name = name.into();
        self
    }

    /// Set the file extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.category = self.category.with_extension(extension);
        self
    }

    /// Set how many days files are kept.
    pub fn with_max_log_days(mut self, days: u32) -> Self {
        self.category = self.category.with_max_log_days(days);
        self
    }

    /// Set the filter directive (e.g., "debug", "info", "warn").
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.category = self.category.with_level(level);
        self
    }

    /// Show or hide timestamps on each line.
    pub fn with_timestamp(mut self, timestamp: bool) -> Self {
        self.category.format.timestamp = timestamp;
        self
    }

    /// Set the full line layout.
    pub fn with_format(mut self, format: LineFormat) -> Self {
        self.category = self.category.with_format(format);
        self
    }

    /// Create the directory on acquisition when it is missing.
    pub fn with_create_dir(mut self, create_dir: bool) -> Self {
        self.category = self.category.with_create_dir(create_dir);
        self
    }

    /// Validate and return the category.
    pub fn build(self) -> Result<LogCategory> {
        self.category.validate()?;
        Ok(self.category)
    }

    /// Acquire a logger for today's file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Invalid configuration is provided
    /// - The directory is missing or not writable
    pub fn logger(self) -> Result<CategoryLogger> {
        CategoryLogger::acquire(&self.build()?)
    }

    /// Delete files older than the retention window, relative to today.
    pub fn sweep(self) -> Result<usize> {
        RetentionSweeper::new(&self.build()?).sweep_today()
    }
}
