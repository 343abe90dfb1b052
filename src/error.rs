//! Crate-level error type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort startup or the dashboard loop.
#[derive(Debug, Error)]
pub enum Error {
    /// Terminal could not be initialized or restored.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Configuration file could not be read or created.
    #[error("config error at {path}: {source}")]
    Config {
        /// The offending config path.
        path: PathBuf,
        /// Underlying reason.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The config directory could not be determined.
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,

    /// The ingestion server failed to bind or serve.
    #[error("server error: {0}")]
    Server(String),
}
