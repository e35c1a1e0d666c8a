//! Severity-leveled logger bound to a category's daily file.
//!
//! Records are handed to a private `tracing` dispatcher whose only layer is a
//! `tracing-subscriber` fmt layer writing through [`DailyFileWriter`]. Nothing
//! is installed globally, so any number of categories can log side by side
//! with the host application's own subscriber.
//!
//! Every acquisition opens its own handle on the file. Two loggers for the same
//! category append independently; interleaving is up to the filesystem.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use time::format_description::well_known::Rfc3339;
use tracing::Dispatch;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt};

use crate::naming::local_offset;
use crate::{DailyFileWriter, Error, LineFormat, LogCategory, Result};

/// Severity of a record, from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Severity {
    /// Label written on every line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Notice => "NOTICE",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
            Severity::Alert => "ALERT",
            Severity::Emergency => "EMERGENCY",
        }
    }

    /// Engine level the severity is filtered and emitted at.
    pub fn level(&self) -> tracing::Level {
        match self {
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info | Severity::Notice => tracing::Level::INFO,
            Severity::Warning => tracing::Level::WARN,
            Severity::Error | Severity::Critical | Severity::Alert | Severity::Emergency => {
                tracing::Level::ERROR
            }
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    /// Parse an operation name such as `"warning"` or `"critical"`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "notice" => Ok(Severity::Notice),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" => Ok(Severity::Critical),
            "alert" => Ok(Severity::Alert),
            "emergency" => Ok(Severity::Emergency),
            other => Err(Error::UnsupportedOperation(other.to_string())),
        }
    }
}

/// Ordered key/value pairs attached to a record, rendered as `{k=v, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    entries: Vec<(String, String)>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key/value pair
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.entries.push((key.into(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("}")
    }
}

/// Logger for one category, writing to the category's file for the current day.
pub struct CategoryLogger {
    name: String,
    format: LineFormat,
    writer: DailyFileWriter,
    dispatch: Dispatch,
}

impl CategoryLogger {
    /// Open today's file for `category` and attach a line formatter to it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The category fails validation or its level is not a valid filter
    /// - The directory is missing (and `create_dir` is off) or not writable
    pub fn acquire(category: &LogCategory) -> Result<Self> {
        category.validate()?;

        let env_filter = EnvFilter::try_new(&category.level)
            .map_err(|e| Error::Config(format!("invalid level {:?}: {}", category.level, e)))?;

        let writer = DailyFileWriter::open(category)?;

        // Same offset as the file name, so a line's date matches its file
        let fmt_layer_builder = tracing_subscriber::fmt::layer()
            .with_timer(OffsetTime::new(local_offset(), Rfc3339))
            .with_writer(writer.clone())
            .with_ansi(false)
            .with_target(false)
            .with_level(false)
            .with_thread_ids(false)
            .with_thread_names(false);

        let fmt_layer = if category.format.timestamp {
            fmt_layer_builder.boxed()
        } else {
            fmt_layer_builder.without_time().boxed()
        };

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer);

        tracing::debug!(
            logger = %category.logger_name,
            path = ?writer.path().ok(),
            "Acquired category logger"
        );

        Ok(Self {
            name: category.logger_name.clone(),
            format: category.format,
            writer,
            dispatch: Dispatch::new(subscriber),
        })
    }

    /// Name the logger identifies itself with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the file currently written to.
    pub fn path(&self) -> Result<PathBuf> {
        Ok(self.writer.path()?)
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::Debug, message, &Context::new());
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Severity::Info, message, &Context::new());
    }

    pub fn notice(&self, message: impl fmt::Display) {
        self.log(Severity::Notice, message, &Context::new());
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Severity::Warning, message, &Context::new());
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Severity::Error, message, &Context::new());
    }

    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Severity::Critical, message, &Context::new());
    }

    pub fn alert(&self, message: impl fmt::Display) {
        self.log(Severity::Alert, message, &Context::new());
    }

    pub fn emergency(&self, message: impl fmt::Display) {
        self.log(Severity::Emergency, message, &Context::new());
    }

    /// Write a record at `severity` with optional context.
    pub fn log(&self, severity: Severity, message: impl fmt::Display, context: &Context) {
        let line = self.render(severity, &message, context);

        // Callsites are static, so each engine level needs its own macro call
        tracing::dispatcher::with_default(&self.dispatch, || match severity {
            Severity::Debug => tracing::debug!(target: "loggable", "{}", line),
            Severity::Info | Severity::Notice => tracing::info!(target: "loggable", "{}", line),
            Severity::Warning => tracing::warn!(target: "loggable", "{}", line),
            Severity::Error | Severity::Critical | Severity::Alert | Severity::Emergency => {
                tracing::error!(target: "loggable", "{}", line)
            }
        });
    }

    /// Write a record through an operation name such as `"warning"`.
    ///
    /// Unknown names fail with [`Error::UnsupportedOperation`].
    pub fn log_named(
        &self,
        operation: &str,
        message: impl fmt::Display,
        context: &Context,
    ) -> Result<()> {
        let severity = operation.parse::<Severity>()?;
        self.log(severity, message, context);
        Ok(())
    }

    /// Sync written records to disk.
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.writer.flush()?)
    }

    /// Body of a line after the engine's timestamp.
    ///
    /// Line breaks inside the message or context become spaces, so every record
    /// occupies exactly one line.
    fn render(&self, severity: Severity, message: &dyn fmt::Display, context: &Context) -> String {
        let mut line = if self.format.logger_name {
            format!("{}.{}: {}", self.name, severity, message)
        } else {
            format!("{}: {}", severity, message)
        };
        if !context.is_empty() || self.format.empty_context {
            line.push(' ');
            line.push_str(&context.to_string());
        }
        flatten_line_breaks(&line)
    }
}

fn flatten_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

impl fmt::Debug for CategoryLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryLogger")
            .field("name", &self.name)
            .field("format", &self.format)
            .field("writer", &self.writer)
            .finish_non_exhaustive()
    }
}

impl LogCategory {
    /// Acquire a logger writing to today's file of this category.
    pub fn logger(&self) -> Result<CategoryLogger> {
        CategoryLogger::acquire(self)
    }

    /// Acquire a fresh logger and write one record through an operation name.
    pub fn log(&self, operation: &str, message: impl fmt::Display) -> Result<()> {
        // Reject the name before touching the filesystem
        let severity = operation.parse::<Severity>()?;
        self.logger()?.log(severity, message, &Context::new());
        Ok(())
    }
}
