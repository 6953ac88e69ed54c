//! Error types for the terminal host.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while hosting a widget tree in the terminal.
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A dumped frame could not be encoded.
    #[error("frame encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The log file could not be opened.
    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        /// Requested log path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The log subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Subscriber(String),
}
