//! Error types for sundry-catalog

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sundry-catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or editing a catalog
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The catalog file does not exist
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The file is not a JSON array of objects
    #[error("Invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        /// Offending file
        path: PathBuf,
        /// Parser error (carries line and column)
        #[source]
        source: serde_json::Error,
    },

    /// A details batch file is malformed
    #[error("Invalid batch {}: {message}", path.display())]
    Batch {
        /// Batch file
        path: PathBuf,
        /// What is wrong with it
        message: String,
    },

    /// Error from sundry-core
    #[error(transparent)]
    Core(#[from] sundry_core::Error),
}
