//! Error types shared by every module of the crate.

use thiserror::Error;

/// Errors raised by the coding engine and its surrounding layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A code parameter or size argument is out of range (e.g. `m < 1`).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Vector and matrix shapes are incompatible for the requested operation.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// User-supplied text or framed content could not be interpreted.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn dimension_mismatch(what: &str, expected: usize, actual: usize) -> Self {
        Error::DimensionMismatch(format!(
            "{} must have length {}, got {}",
            what, expected, actual
        ))
    }
}
