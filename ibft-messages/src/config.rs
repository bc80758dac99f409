//! Message store and registry configuration.

use crate::{MessageError, MessageResult};
use serde::{Deserialize, Serialize};

/// When the store forwards a count change to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalPolicy {
    /// Dispatch after every `record`. Subscriptions still only see counts at
    /// or above their threshold.
    #[default]
    EveryIncrement,
    /// Dispatch only to subscriptions whose threshold was crossed by this
    /// increment, so each one is signaled once per crossing.
    ThresholdCrossing,
}

/// Message core settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// Signaling policy used by the store
    pub signal_policy: SignalPolicy,

    /// Maximum number of live subscriptions (unbounded when unset)
    pub max_subscriptions: Option<usize>,
}

impl MessagesConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::InvalidConfig` if `max_subscriptions` is zero.
    pub fn validate(&self) -> MessageResult<()> {
        if self.max_subscriptions == Some(0) {
            return Err(MessageError::invalid_config(
                "max_subscriptions must be at least 1",
            ));
        }
        Ok(())
    }
}
