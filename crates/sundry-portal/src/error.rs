//! Error types for sundry-portal

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sundry-portal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a portal
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The manifest could not be parsed or is inconsistent
    #[error("Invalid manifest {}: {message}", path.display())]
    Manifest {
        /// Manifest file
        path: PathBuf,
        /// What is wrong
        message: String,
    },

    /// A document entry has neither an id nor a usable file name
    #[error("Cannot derive a document id from '{file}'")]
    DocumentId {
        /// The entry's file
        file: String,
    },

    /// Error from sundry-core
    #[error(transparent)]
    Core(#[from] sundry_core::Error),
}
