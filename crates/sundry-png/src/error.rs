//! Error types for sundry-png

use thiserror::Error;

/// Result type alias for sundry-png operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or writing images
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Width or height was zero or does not fit the IHDR field
    #[error("Invalid image dimensions: {width}x{height}")]
    Dimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// The pixel rows do not match the declared dimensions
    #[error("Pixel data mismatch: expected {expected} pixels, got {actual}")]
    PixelCount {
        /// width * height
        expected: usize,
        /// Pixels supplied
        actual: usize,
    },

    /// zlib stream could not be produced
    #[error("Compression failed: {0}")]
    Compression(#[source] std::io::Error),

    /// Error from sundry-core (file writes)
    #[error(transparent)]
    Core(#[from] sundry_core::Error),
}
