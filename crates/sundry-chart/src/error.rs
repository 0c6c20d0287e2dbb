//! Error types for sundry-chart

use thiserror::Error;

/// Result type alias for sundry-chart operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing or writing charts
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Amounts cannot be scaled because they sum to zero or less
    #[error("Holdings sum to {total}; nothing to normalize")]
    EmptyData {
        /// Sum of the raw amounts
        total: f64,
    },

    /// Requested market size is not a positive finite number
    #[error("Invalid target total: {0}")]
    InvalidTotal(f64),

    /// Error from sundry-core
    #[error(transparent)]
    Core(#[from] sundry_core::Error),
}
