//! Subscription registry and dispatcher.
//!
//! The registry owns the live subscriptions in an id-keyed arena behind a
//! read-mostly lock. `dispatch` iterates under the read lock and only calls
//! the non-blocking [`Subscription::notify`], so a slow consumer never stalls
//! the ingestion path. Cancelled subscriptions are reaped lazily after a pass
//! that encounters them.
//!
//! The registry never takes a message store lock.

use crate::subscription::{
    Notification, Subscription, SubscriptionDetails, SubscriptionHandle, SubscriptionId,
};
use crate::{MessageError, MessageResult, MessageType, MessagesConfig, View};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Live subscription set plus fan-out.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    subscriptions: RwLock<HashMap<SubscriptionId, Arc<Subscription>>>,
    next_id: AtomicU64,
    closed: AtomicBool,
    max_subscriptions: Option<usize>,
}

impl SubscriptionRegistry {
    /// Creates an unbounded registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry honoring `config.max_subscriptions`.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::InvalidConfig` if the configuration is invalid.
    pub fn with_config(config: &MessagesConfig) -> MessageResult<Self> {
        config.validate()?;
        Ok(Self {
            max_subscriptions: config.max_subscriptions,
            ..Self::default()
        })
    }

    /// Registers a new subscription.
    ///
    /// # Errors
    ///
    /// - `MessageError::InvalidSubscription` for invalid details
    /// - `MessageError::RegistryClosed` after [`SubscriptionRegistry::close`]
    /// - `MessageError::SubscriptionLimitReached` when at capacity
    pub fn subscribe(&self, details: SubscriptionDetails) -> MessageResult<SubscriptionHandle> {
        if let Err(err) = details.validate() {
            warn!(?details, %err, "rejected subscription");
            return Err(err);
        }

        let mut subscriptions = self.subscriptions.write();
        // Checked under the write lock so `close` cannot interleave.
        if self.is_closed() {
            return Err(MessageError::RegistryClosed);
        }

        if let Some(limit) = self.max_subscriptions {
            if subscriptions.len() >= limit {
                subscriptions.retain(|_, sub| !sub.is_cancelled());
            }
            if subscriptions.len() >= limit {
                warn!(limit, "subscription limit reached");
                return Err(MessageError::SubscriptionLimitReached { limit });
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let subscription = Arc::new(Subscription::new(id, details));
        subscriptions.insert(id, Arc::clone(&subscription));

        debug!(
            id,
            message_type = %details.message_type,
            view = %details.view,
            min_num_messages = details.min_num_messages,
            has_min_round = details.has_min_round,
            "subscribed"
        );

        Ok(SubscriptionHandle::new(subscription))
    }

    /// Cancels and removes a subscription. Returns `false` if it was already
    /// gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.subscriptions.write().remove(&id);
        match removed {
            Some(subscription) => {
                subscription.cancel();
                debug!(id, "unsubscribed");
                true
            }
            None => false,
        }
    }

    /// Fans out a count change for `(message_type, view)` to every live
    /// subscription that supports the event and whose threshold `count`
    /// meets. Returns the number of subscriptions notified.
    ///
    /// Takes the write lock afterwards to reap cancelled subscriptions if the
    /// pass found any, so callers holding a store lane lock may briefly wait
    /// on concurrent `subscribe`/`unsubscribe`.
    pub fn dispatch(&self, message_type: MessageType, view: View, count: usize) -> usize {
        self.fan_out(message_type, view, count, |sub| sub.threshold_met(count))
    }

    /// Like [`SubscriptionRegistry::dispatch`], but only notifies
    /// subscriptions whose threshold lies in `(previous, count]`, so each
    /// subscription is signaled once per crossing. Same locking as `dispatch`.
    pub fn dispatch_crossing(
        &self,
        message_type: MessageType,
        view: View,
        previous: usize,
        count: usize,
    ) -> usize {
        self.fan_out(message_type, view, count, |sub| {
            sub.threshold_crossed(previous, count)
        })
    }

    fn fan_out<F>(&self, message_type: MessageType, view: View, count: usize, wants: F) -> usize
    where
        F: Fn(&Subscription) -> bool,
    {
        let notification = Notification {
            round: view.round,
            count,
        };
        let mut notified = 0;
        let mut stale = false;

        {
            let subscriptions = self.subscriptions.read();
            for subscription in subscriptions.values() {
                if subscription.is_cancelled() {
                    stale = true;
                    continue;
                }
                if subscription.event_supported(message_type, view) && wants(subscription) {
                    subscription.notify(notification);
                    notified += 1;
                }
            }
        }

        if stale {
            self.reap();
        }

        if notified > 0 {
            debug!(%message_type, %view, count, notified, "dispatched");
        }
        notified
    }

    /// Removes cancelled subscriptions. Returns how many were removed.
    pub fn reap(&self) -> usize {
        let mut subscriptions = self.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|_, sub| !sub.is_cancelled());
        let reaped = before - subscriptions.len();
        if reaped > 0 {
            debug!(reaped, "reaped cancelled subscriptions");
        }
        reaped
    }

    /// Cancels every subscription and rejects future ones. Idempotent.
    pub fn close(&self) {
        let mut subscriptions = self.subscriptions.write();
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        let count = subscriptions.len();
        for (_, subscription) in subscriptions.drain() {
            subscription.cancel();
        }
        info!(cancelled = count, "subscription registry closed");
    }

    /// Whether [`SubscriptionRegistry::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of live (not cancelled) subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions
            .read()
            .values()
            .filter(|sub| !sub.is_cancelled())
            .count()
    }

    /// Whether there are no live subscriptions
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
