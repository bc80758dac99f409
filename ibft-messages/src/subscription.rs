//! Subscriptions: registered interest in future messages.
//!
//! Each subscription owns a single-slot mailbox. Producers never wait on it:
//! a new notification replaces any unread one ("latest value wins"). The
//! consumer treats a notification as a prompt to re-query the store, not as
//! authoritative data, so dropping superseded values is harmless.

use crate::{MessageError, MessageResult, MessageType, View};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::trace;

/// Registry-assigned subscription identifier.
pub type SubscriptionId = u64;

/// Immutable matching criteria, fixed at subscribe time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionDetails {
    /// Message kind of interest
    pub message_type: MessageType,
    /// View of interest
    pub view: View,
    /// Count threshold; counts below it are never delivered
    pub min_num_messages: usize,
    /// Match `view.round` and every later round at the same height
    pub has_min_round: bool,
}

impl SubscriptionDetails {
    /// Creates exact-round details.
    pub fn new(message_type: MessageType, view: View, min_num_messages: usize) -> Self {
        Self {
            message_type,
            view,
            min_num_messages,
            has_min_round: false,
        }
    }

    /// Switches to the minimum-round policy.
    #[must_use]
    pub fn with_min_round(mut self) -> Self {
        self.has_min_round = true;
        self
    }

    /// Checks the parameters. Height and round are unsigned, so only the
    /// threshold can be out of range.
    ///
    /// # Errors
    ///
    /// Returns `MessageError::InvalidSubscription` if `min_num_messages` is zero.
    pub fn validate(&self) -> MessageResult<()> {
        if self.min_num_messages == 0 {
            return Err(MessageError::invalid_subscription(
                "min_num_messages must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Value delivered through a subscription mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    /// Round of the bucket whose count changed
    pub round: u64,
    /// Message count observed in that bucket
    pub count: usize,
}

/// One registered interest.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    details: SubscriptionDetails,
    mailbox: Mutex<Option<Notification>>,
    /// Wake signal; `Notify` holds at most one permit.
    wake: Notify,
    cancelled: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, details: SubscriptionDetails) -> Self {
        Self {
            id,
            details,
            mailbox: Mutex::new(None),
            wake: Notify::new(),
            cancelled: AtomicBool::new(false),
        }
    }

    /// Subscription identifier
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Matching criteria
    pub fn details(&self) -> &SubscriptionDetails {
        &self.details
    }

    /// Whether an event of `message_type` at `view` is of interest.
    ///
    /// Tests type and view only; the count threshold is applied separately by
    /// the dispatcher.
    pub fn event_supported(&self, message_type: MessageType, view: View) -> bool {
        if message_type != self.details.message_type {
            return false;
        }

        if self.details.has_min_round {
            self.details.view.matches_min_round(&view)
        } else {
            self.details.view.matches_exact(&view)
        }
    }

    /// Whether `count` satisfies the threshold.
    pub fn threshold_met(&self, count: usize) -> bool {
        count >= self.details.min_num_messages
    }

    /// Whether moving from `previous` to `count` crossed the threshold.
    pub fn threshold_crossed(&self, previous: usize, count: usize) -> bool {
        previous < self.details.min_num_messages && self.threshold_met(count)
    }

    /// Places `notification` in the mailbox without blocking, replacing any
    /// unread value. Returns `true` if an unread value was superseded.
    ///
    /// Does nothing once cancelled.
    pub fn notify(&self, notification: Notification) -> bool {
        if self.is_cancelled() {
            return false;
        }

        let superseded = self.mailbox.lock().replace(notification);
        self.wake.notify_one();

        if let Some(old) = superseded {
            trace!(
                id = self.id,
                old_count = old.count,
                new_count = notification.count,
                "coalesced unread notification"
            );
        }
        superseded.is_some()
    }

    /// Closes the cancellation signal. Only the first call returns `true`;
    /// later or concurrent calls are no-ops.
    pub fn cancel(&self) -> bool {
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return false;
        }
        // Wake every consumer parked in `recv`; the stored permit covers one
        // that has not parked yet.
        self.wake.notify_waiters();
        self.wake.notify_one();
        true
    }

    /// Non-blocking cancellation check
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Takes the pending notification, if any, without waiting.
    pub fn try_recv(&self) -> Option<Notification> {
        self.mailbox.lock().take()
    }

    /// Waits for the next notification.
    ///
    /// A value delivered before cancellation is still returned; after that,
    /// returns `None`.
    pub async fn recv(&self) -> Option<Notification> {
        loop {
            // Registered before the state checks so `notify_waiters` in
            // `cancel` cannot slip between the check and the wait.
            let notified = self.wake.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(notification) = self.try_recv() {
                return Some(notification);
            }
            if self.is_cancelled() {
                return None;
            }
            notified.await;
        }
    }
}

/// Owner's side of a subscription. Cancels the subscription when dropped.
#[derive(Debug)]
pub struct SubscriptionHandle {
    subscription: Arc<Subscription>,
}

impl SubscriptionHandle {
    pub(crate) fn new(subscription: Arc<Subscription>) -> Self {
        Self { subscription }
    }

    pub(crate) fn subscription(&self) -> &Arc<Subscription> {
        &self.subscription
    }

    /// Subscription identifier
    pub fn id(&self) -> SubscriptionId {
        self.subscription.id()
    }

    /// Matching criteria
    pub fn details(&self) -> &SubscriptionDetails {
        self.subscription.details()
    }

    /// See [`Subscription::event_supported`].
    pub fn event_supported(&self, message_type: MessageType, view: View) -> bool {
        self.subscription.event_supported(message_type, view)
    }

    /// See [`Subscription::recv`].
    pub async fn recv(&self) -> Option<Notification> {
        self.subscription.recv().await
    }

    /// See [`Subscription::try_recv`].
    pub fn try_recv(&self) -> Option<Notification> {
        self.subscription.try_recv()
    }

    /// See [`Subscription::cancel`].
    pub fn cancel(&self) -> bool {
        self.subscription.cancel()
    }

    /// See [`Subscription::is_cancelled`].
    pub fn is_cancelled(&self) -> bool {
        self.subscription.is_cancelled()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.subscription.cancel();
    }
}
