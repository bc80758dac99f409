//! Error types for the message core.
//!
//! The error surface is narrow because nothing here performs I/O.
//!
//! | Error | Description |
//! |-------|-------------|
//! | `InvalidSubscription` | Subscription parameters rejected at subscribe time |
//! | `SubscriptionLimitReached` | Registry is at its configured capacity |
//! | `RegistryClosed` | Registry was shut down |
//! | `InvalidMessageType` | Unknown message type tag |
//! | `InvalidConfig` | Configuration value out of range |
//!
//! Double cancellation, dispatch against a cancelled subscription, and
//! mailbox coalescing are defined behavior, not errors.
//!
//! ## Example
//!
//! ```rust
//! use ibft_messages::error::MessageError;
//!
//! let err = MessageError::invalid_subscription("min_num_messages must be at least 1");
//! assert!(err.to_string().contains("Invalid subscription"));
//! ```

use thiserror::Error;

/// Errors that can occur in the message core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// Subscription parameters were rejected.
    #[error("Invalid subscription: {reason}")]
    InvalidSubscription {
        /// Why the parameters were rejected.
        reason: String,
    },

    /// The registry already holds its maximum number of live subscriptions.
    #[error("Subscription limit reached: {limit}")]
    SubscriptionLimitReached {
        /// Configured limit.
        limit: usize,
    },

    /// The registry has been closed.
    #[error("Subscription registry is closed")]
    RegistryClosed,

    /// Unknown message type tag.
    #[error("Invalid message type: {0:#04x}")]
    InvalidMessageType(u8),

    /// Configuration error.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message.
        message: String,
    },
}

impl MessageError {
    /// Create an invalid subscription error.
    pub fn invalid_subscription<S: Into<String>>(reason: S) -> Self {
        Self::InvalidSubscription {
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result type for message core operations.
pub type MessageResult<T> = std::result::Result<T, MessageError>;
