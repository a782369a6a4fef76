//! Error types for the populate pipeline.

use listen80_generator::GeneratorError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating and loading a dataset.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// Reading or writing a transient or snapshot file failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot serialization error.
    #[error("Snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generator error.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// Error reported by the bulk loader.
    #[error("Loader error: {0}")]
    Loader(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PopulateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PopulateError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn loader<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PopulateError::Loader(Box::new(err))
    }
}
