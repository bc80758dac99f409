//! # ibft-rs: IBFT message coordination core
//!
//! Subscribe/notify primitive and message store for an IBFT-style
//! Byzantine-fault-tolerant consensus engine.
//!
//! The round state machine registers interest in future protocol messages
//! and is signaled when they arrive, instead of polling a shared store.
//!
//! ## Architecture
//!
//! - [`primitives`] - `UInt256` fixed-size encoding and hash-tree roots
//! - [`messages`] - views, message types, subscriptions, registry, store
//! - [`telemetry`] - structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ibft_rs::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load("ibft.toml")?;
//!     let store = ibft_rs::init(&settings)?;
//!
//!     let details = SubscriptionDetails::new(MessageType::Commit, View::new(1, 0), 3);
//!     let handle = store.subscribe(details)?;
//!
//!     if let Some(notification) = handle.recv().await {
//!         let commits = store.messages_at(MessageType::Commit, View::new(1, notification.round));
//!         println!("{} commits", commits.len());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod settings;

// Re-export all public APIs from member crates
pub use ibft_messages as messages;
pub use ibft_primitives as primitives;
pub use ibft_telemetry as telemetry;

pub use settings::{Settings, SettingsError, SettingsResult};

use messages::MessageStore;

/// Builds a message store from settings without touching logging.
pub fn build_store(settings: &Settings) -> SettingsResult<MessageStore> {
    Ok(MessageStore::with_config(&settings.messages)?)
}

/// Installs the logging subscriber and builds a message store.
pub fn init(settings: &Settings) -> anyhow::Result<MessageStore> {
    telemetry::init_logging(&settings.logging)?;
    let store = build_store(settings)?;
    tracing::info!(
        signal_policy = ?settings.messages.signal_policy,
        max_subscriptions = ?settings.messages.max_subscriptions,
        "message store ready"
    );
    Ok(store)
}

/// Common imports
pub mod prelude {
    pub use crate::messages::{
        Message, MessageError, MessageStore, MessageType, MessagesConfig, Notification,
        SignalPolicy, SubscriptionDetails, SubscriptionHandle, SubscriptionRegistry, View,
    };
    pub use crate::primitives::{Hash, HashTreeRoot, UInt256};
    pub use crate::settings::Settings;
    pub use crate::telemetry::{LogConfig, LogFormat};
}
