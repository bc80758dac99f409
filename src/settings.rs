//! Process-level settings aggregating each crate's configuration.
//!
//! ```toml
//! [messages]
//! signal_policy = "threshold-crossing"
//! max_subscriptions = 1024
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use crate::messages::{MessageError, MessagesConfig};
use crate::telemetry::LogConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading [`Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Could not read the settings file
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings were not valid TOML for this schema
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value was out of range
    #[error(transparent)]
    Invalid(#[from] MessageError),
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Message store and registry settings
    pub messages: MessagesConfig,

    /// Logging settings
    pub logging: LogConfig,
}

impl Settings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(text: &str) -> SettingsResult<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.messages.validate()?;
        Ok(settings)
    }

    /// Reads and validates settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> SettingsResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
