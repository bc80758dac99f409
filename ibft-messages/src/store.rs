//! Message store: per (height, round, type) buckets of received messages.
//!
//! Each message type has its own lane (an ordered map from view to bucket)
//! behind its own lock. `record` holds the lane's write lock while it
//! dispatches, so dispatches for one bucket happen in count order and a
//! subscriber never sees a bucket's count go backwards. Lock order is always
//! store lane, then registry.

use crate::subscription::{Notification, SubscriptionDetails, SubscriptionHandle, SubscriptionId};
use crate::{
    Message, MessageResult, MessageType, MessagesConfig, SignalPolicy, SubscriptionRegistry, View,
};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, trace};

#[derive(Debug, Default)]
struct Bucket {
    messages: Vec<Message>,
    /// Count at the last dispatch, the lower bound for threshold crossings.
    signaled: usize,
}

type Lane = BTreeMap<View, Bucket>;

/// Received messages plus the registry they signal.
#[derive(Debug)]
pub struct MessageStore {
    lanes: [RwLock<Lane>; MessageType::COUNT],
    registry: Arc<SubscriptionRegistry>,
    signal_policy: SignalPolicy,
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::with_registry(Arc::new(SubscriptionRegistry::new()), SignalPolicy::default())
    }
}

impl MessageStore {
    /// Creates a store with its own unbounded registry and the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store and registry from configuration.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::InvalidConfig` if the configuration is invalid.
    pub fn with_config(config: &MessagesConfig) -> MessageResult<Self> {
        let registry = SubscriptionRegistry::with_config(config)?;
        Ok(Self::with_registry(Arc::new(registry), config.signal_policy))
    }

    /// Creates a store signaling an existing registry.
    pub fn with_registry(registry: Arc<SubscriptionRegistry>, signal_policy: SignalPolicy) -> Self {
        Self {
            lanes: Default::default(),
            registry,
            signal_policy,
        }
    }

    fn lane(&self, message_type: MessageType) -> &RwLock<Lane> {
        &self.lanes[message_type.index()]
    }

    /// The registry this store signals.
    pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
        &self.registry
    }

    /// Active signaling policy.
    pub fn signal_policy(&self) -> SignalPolicy {
        self.signal_policy
    }

    /// Appends `message` to its bucket, signals the registry, and returns the
    /// bucket's new count. Does not deduplicate.
    pub fn record(&self, message: Message) -> usize {
        let message_type = message.message_type;
        let view = message.view;

        let mut lane = self.lane(message_type).write();
        let bucket = lane.entry(view).or_default();
        bucket.messages.push(message);
        let count = bucket.messages.len();

        let notified = match self.signal_policy {
            SignalPolicy::EveryIncrement => self.registry.dispatch(message_type, view, count),
            SignalPolicy::ThresholdCrossing => {
                self.registry
                    .dispatch_crossing(message_type, view, bucket.signaled, count)
            }
        };
        bucket.signaled = count;

        trace!(%message_type, %view, count, notified, "recorded message");
        count
    }

    /// Registers `details` and, if the store already satisfies them, delivers
    /// a catch-up notification right away. For minimum-round details the
    /// highest qualifying round wins.
    ///
    /// # Errors
    ///
    /// Propagates registry errors (invalid details, closed, at capacity).
    pub fn subscribe(&self, details: SubscriptionDetails) -> MessageResult<SubscriptionHandle> {
        let handle = self.registry.subscribe(details)?;

        let lane = self.lane(details.message_type).read();
        let ready = if details.has_min_round {
            lane.range(details.view..=details.view.last_round())
                .rev()
                .find(|(_, bucket)| bucket.messages.len() >= details.min_num_messages)
        } else {
            lane.get_key_value(&details.view)
                .filter(|(_, bucket)| bucket.messages.len() >= details.min_num_messages)
        };

        if let Some((view, bucket)) = ready {
            let notification = Notification {
                round: view.round,
                count: bucket.messages.len(),
            };
            handle.subscription().notify(notification);
            debug!(id = handle.id(), %view, count = notification.count, "catch-up signal");
        }

        Ok(handle)
    }

    /// Cancels and removes a subscription. Idempotent.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.registry.unsubscribe(id)
    }

    /// Number of messages in the `(message_type, view)` bucket.
    pub fn count_at(&self, message_type: MessageType, view: View) -> usize {
        self.lane(message_type)
            .read()
            .get(&view)
            .map_or(0, |bucket| bucket.messages.len())
    }

    /// Snapshot of the `(message_type, view)` bucket, in arrival order.
    pub fn messages_at(&self, message_type: MessageType, view: View) -> Vec<Message> {
        self.lane(message_type)
            .read()
            .get(&view)
            .map(|bucket| bucket.messages.clone())
            .unwrap_or_default()
    }

    /// Returns the bucket's messages accepted by `is_valid` and removes the
    /// rejected ones from the store.
    pub fn valid_messages_at<F>(
        &self,
        message_type: MessageType,
        view: View,
        is_valid: F,
    ) -> Vec<Message>
    where
        F: Fn(&Message) -> bool,
    {
        let mut lane = self.lane(message_type).write();
        let Some(bucket) = lane.get_mut(&view) else {
            return Vec::new();
        };

        let before = bucket.messages.len();
        bucket.messages.retain(|message| is_valid(message));
        let after = bucket.messages.len();
        // A shrunk bucket must be able to cross its thresholds again.
        bucket.signaled = bucket.signaled.min(after);

        if after < before {
            debug!(%message_type, %view, removed = before - after, "dropped invalid messages");
        }
        bucket.messages.clone()
    }

    /// Among ROUND_CHANGE buckets at `height` with round >= `min_round`,
    /// returns the largest one; ties go to the higher round.
    pub fn most_round_change_messages(&self, min_round: u64, height: u64) -> Vec<Message> {
        let from = View::new(height, min_round);
        let lane = self.lane(MessageType::RoundChange).read();

        lane.range(from..=from.last_round())
            .filter(|(_, bucket)| !bucket.messages.is_empty())
            .max_by_key(|(view, bucket)| (bucket.messages.len(), view.round))
            .map(|(_, bucket)| bucket.messages.clone())
            .unwrap_or_default()
    }

    /// Drops every bucket below `height`. Returns the number of messages
    /// dropped.
    pub fn prune_below(&self, height: u64) -> usize {
        let boundary = View::new(height, 0);
        let mut dropped = 0;

        for lane in &self.lanes {
            let mut lane = lane.write();
            let kept = lane.split_off(&boundary);
            dropped += lane.values().map(|bucket| bucket.messages.len()).sum::<usize>();
            *lane = kept;
        }

        if dropped > 0 {
            info!(height, dropped, "pruned messages below height");
        }
        dropped
    }

    /// Closes the registry, cancelling every subscription.
    pub fn close(&self) {
        self.registry.close();
    }
}
