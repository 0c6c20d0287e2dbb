//! Error types for sundry-serve

use std::net::SocketAddr;

use thiserror::Error;

/// Result type alias for sundry-serve operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while starting or running the server
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The listening socket could not be bound
    #[error("Cannot bind {addr}: {source}")]
    Bind {
        /// Requested address
        addr: SocketAddr,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error
    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),

    /// No certificate could be found or generated
    #[error("Certificate error: {message}")]
    Certificate {
        /// What went wrong and how to fix it
        message: String,
    },

    /// Certificate files exist but could not be loaded
    #[error("TLS configuration error: {0}")]
    Tls(#[source] std::io::Error),

    /// The document root is not a directory
    #[error("Document root {0} is not a directory")]
    Root(std::path::PathBuf),

    /// Error from sundry-core
    #[error(transparent)]
    Core(#[from] sundry_core::Error),
}

impl Error {
    /// Creates a new certificate error.
    pub fn certificate<S: Into<String>>(message: S) -> Self {
        Error::Certificate {
            message: message.into(),
        }
    }
}
