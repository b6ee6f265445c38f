//! File logging.
//!
//! The terminal owns stdout, so events go to a file. `RUST_LOG` overrides
//! the configured level.

use std::{
    fs::{File, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging setup errors.
#[derive(Debug, Error)]
pub enum LogError {
    /// Log file could not be opened.
    #[error("cannot open log file {path}: {source}")]
    Open {
        /// Requested log file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A global subscriber was already installed.
    #[error("logging already initialized: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the level filter: `RUST_LOG` if set, otherwise `level`.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install a global subscriber appending to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a subscriber is
/// already installed.
pub fn init(path: &Path, level: &str) -> Result<(), LogError> {
    let file = open(path)?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter(level))
        .try_init()?;

    tracing::info!(path = %path.display(), "logging to file");
    Ok(())
}

fn open(path: &Path) -> Result<File, LogError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogError::Open { path: path.to_path_buf(), source })
}
