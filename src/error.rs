use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors that can occur in the logging library
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Category configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// A file name does not carry a `YYYY-MM-DD` date in the expected place.
    #[error("Cannot parse date from {}: {reason}", .file.display())]
    DateParse { file: PathBuf, reason: String },
    /// The logger facade has no operation with this name.
    #[error("Unsupported logger operation: {0}")]
    UnsupportedOperation(String),
    #[error("Time error: {0}")]
    Time(#[from] time::error::Error),
    /// Initialization failed.
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
