//! Subscription management for event channels.
//!
//! This module provides subscription IDs and the `EventChannel`, a
//! multicast, synchronous, replay-free channel adapters publish change
//! messages to.

use core::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;
use herald_core::{ChangeMessage, MessageFilter};
use parking_lot::RwLock;

/// Unique identifier for a subscription.
pub type SubscriptionId = u64;

/// Callback type for change notifications.
pub type ChangeCallback<D, M> = Box<dyn Fn(&ChangeMessage<D, M>) + Send + Sync>;

/// A subscription to change messages.
pub struct Subscription<D, M> {
    /// Unique identifier
    id: SubscriptionId,
    /// Callback to invoke on messages
    callback: ChangeCallback<D, M>,
    /// Whether this subscription is active
    active: bool,
}

impl<D, M> Subscription<D, M> {
    /// Creates a new subscription.
    pub fn new<F>(id: SubscriptionId, callback: F) -> Self
    where
        F: Fn(&ChangeMessage<D, M>) + Send + Sync + 'static,
    {
        Self {
            id,
            callback: Box::new(callback),
            active: true,
        }
    }

    /// Returns the subscription ID.
    #[inline]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Returns whether this subscription is active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Deactivates this subscription.
    #[inline]
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Notifies this subscription of a message.
    pub fn notify(&self, message: &ChangeMessage<D, M>) {
        if self.active {
            (self.callback)(message);
        }
    }
}

/// A multicast, synchronous, replay-free event channel.
///
/// Adapters publish exactly one message per successful mutation; all
/// current subscribers receive it synchronously on the publishing
/// thread, in publish order. A subscriber attached after a message was
/// published never sees that message.
pub struct EventChannel<D, M> {
    /// Active subscriptions
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription<D, M>>>,
    /// Next subscription ID to assign
    next_id: AtomicU64,
}

impl<D, M> Default for EventChannel<D, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, M> EventChannel<D, M> {
    /// Creates a new event channel with no subscribers.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Subscribes to messages with the given callback.
    ///
    /// Returns the subscription ID that can be used to unsubscribe.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeMessage<D, M>) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let subscription = Subscription::new(id, callback);
        self.subscriptions.write().insert(id, subscription);
        tracing::debug!(subscription = id, "subscribed");
        id
    }

    /// Subscribes with a filter chain in front of the callback.
    ///
    /// The callback is only invoked for messages the filter passes.
    /// Filters compose by logical AND via [`MessageFilter::and`].
    pub fn subscribe_filtered<G, F>(&self, filter: G, callback: F) -> SubscriptionId
    where
        G: MessageFilter<D, M> + Send + Sync + 'static,
        F: Fn(&ChangeMessage<D, M>) + Send + Sync + 'static,
    {
        self.subscribe(move |message| {
            if filter.matches(message) {
                callback(message);
            }
        })
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.subscriptions.write().remove(&id).is_some();
        if removed {
            tracing::debug!(subscription = id, "unsubscribed");
        }
        removed
    }

    /// Publishes a message to all active subscribers, synchronously.
    ///
    /// Callbacks run on the publishing thread and must not subscribe
    /// or unsubscribe on the same channel (the subscription table is
    /// read-locked for the duration of the emission).
    pub fn publish(&self, message: &ChangeMessage<D, M>) {
        let subscriptions = self.subscriptions.read();
        tracing::trace!(
            change_type = %message.change_type(),
            subscribers = subscriptions.len(),
            "publishing change message"
        );
        for subscription in subscriptions.values() {
            subscription.notify(message);
        }
    }

    /// Returns the number of subscriptions.
    #[inline]
    pub fn len(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Returns true if there are no subscriptions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.read().is_empty()
    }

    /// Returns all subscription IDs.
    pub fn subscription_ids(&self) -> Vec<SubscriptionId> {
        self.subscriptions.read().keys().copied().collect()
    }

    /// Removes all subscriptions.
    pub fn clear(&self) {
        self.subscriptions.write().clear();
    }
}
