//! # IBFT Messages
//!
//! Message store and subscribe/notify primitive for an IBFT-style consensus
//! engine.
//!
//! The round state machine registers interest in future messages ("signal me
//! once at least N COMMIT messages exist for height H, round >= R") instead
//! of polling the store, and the ingestion path notifies exactly the
//! subscriptions matching each message it records.
//!
//! ## Core Types
//!
//! - [`View`]: (height, round) pair
//! - [`MessageType`]: PREPREPARE, PREPARE, COMMIT, ROUND_CHANGE
//! - [`SubscriptionDetails`]: immutable matching criteria
//! - [`SubscriptionRegistry`]: live subscriptions and fan-out
//! - [`MessageStore`]: per (height, round, type) buckets
//!
//! ## Flow
//!
//! ```text
//! ┌───────────┐  record   ┌──────────────┐  dispatch  ┌──────────────────────┐
//! │ ingestion │──────────>│ MessageStore │───────────>│ SubscriptionRegistry │
//! └───────────┘           └──────────────┘            └──────────────────────┘
//!                                ▲                              │ notify
//!                                │ re-query                     ▼ (latest value wins)
//!                         ┌──────────────┐    recv     ┌──────────────────────┐
//!                         │ round state  │<────────────│   subscription slot  │
//!                         │   machine    │             └──────────────────────┘
//!                         └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ibft_messages::{Message, MessageStore, MessageType, SubscriptionDetails, View};
//!
//! let store = MessageStore::new();
//! let details = SubscriptionDetails::new(MessageType::Commit, View::new(7, 0), 2);
//! let handle = store.subscribe(details).unwrap();
//!
//! store.record(Message::new(View::new(7, 0), vec![1], MessageType::Commit, vec![]));
//! assert_eq!(handle.try_recv(), None);
//!
//! store.record(Message::new(View::new(7, 0), vec![2], MessageType::Commit, vec![]));
//! assert_eq!(handle.try_recv().map(|n| n.count), Some(2));
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod message_type;
pub mod registry;
pub mod store;
pub mod subscription;
pub mod view;

// Re-exports
pub use config::{MessagesConfig, SignalPolicy};
pub use error::{MessageError, MessageResult};
pub use message::Message;
pub use message_type::MessageType;
pub use registry::SubscriptionRegistry;
pub use store::MessageStore;
pub use subscription::{
    Notification, Subscription, SubscriptionDetails, SubscriptionHandle, SubscriptionId,
};
pub use view::View;
