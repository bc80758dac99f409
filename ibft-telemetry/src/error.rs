//! Telemetry error types

use thiserror::Error;

/// Telemetry-related errors
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Invalid filter directive
    #[error("Invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// The offending directive
        directive: String,
        /// Parser message
        message: String,
    },
}

/// Result type for telemetry operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;
