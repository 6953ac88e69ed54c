//! Log subscriber setup for the demo binaries.

use crate::error::AppError;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Build the event filter: `RUST_LOG` wins, `default` applies otherwise.
///
/// # Errors
///
/// Returns [`AppError::Subscriber`] if `default` is not a valid directive.
pub fn env_filter(default: &str) -> Result<EnvFilter, AppError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(default).map_err(|e| AppError::Subscriber(e.to_string()))
}

/// Install the global `tracing` subscriber.
///
/// With `log_file`, events are written there without ANSI colors; otherwise
/// they go to stderr.
///
/// # Errors
///
/// Fails if the filter is invalid, the file cannot be created, or a global
/// subscriber is already installed.
pub fn init_tracing(default: &str, log_file: Option<&Path>) -> Result<(), AppError> {
    let filter = env_filter(default)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| AppError::LogFile {
                path: path.to_path_buf(),
                source,
            })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| AppError::Subscriber(e.to_string()))
}
