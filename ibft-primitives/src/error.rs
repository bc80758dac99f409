//! Error types for primitive encoding and parsing.

use thiserror::Error;

/// Errors raised while building or decoding primitive values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Input had the wrong number of bytes.
    #[error("Invalid length: expected {expected}, got {got}")]
    InvalidLength {
        /// Expected length (or maximum length for variable input).
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Input was not valid hexadecimal.
    #[error("Invalid hex: {message}")]
    InvalidHex {
        /// Error message.
        message: String,
    },
}

impl PrimitiveError {
    /// Create an invalid hex error.
    pub fn invalid_hex<S: Into<String>>(message: S) -> Self {
        Self::InvalidHex {
            message: message.into(),
        }
    }
}

/// Result type for primitive operations.
pub type PrimitiveResult<T> = std::result::Result<T, PrimitiveError>;
