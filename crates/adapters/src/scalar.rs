//! Single-value adapter.

use crate::guard::Guarded;
use herald_channel::{EventChannel, SubscriptionId};
use herald_core::{ChangeMessage, ChangeType, MessageFilter, Metadata, Result};

/// A change-notifying wrapper around a single value.
///
/// `update` unconditionally replaces the held value and publishes an
/// UPDATE message carrying the old and new value as snapshots. The
/// scalar message carries no metadata: the new value already is the
/// full new state.
///
/// # Example
///
/// ```rust
/// use herald_adapters::ScalarAdapter;
///
/// let adapter = ScalarAdapter::new(0);
/// adapter.subscribe(|msg| {
///     println!("{} -> {}", msg.old_data(), msg.new_data());
/// });
///
/// adapter.update(42).unwrap();
/// assert_eq!(adapter.get(), 42);
/// ```
pub struct ScalarAdapter<D> {
    value: Guarded<D>,
    channel: EventChannel<D, D>,
}

impl<D: Clone + Send + Sync + 'static> ScalarAdapter<D> {
    /// Creates an adapter seeded with `initial`. No message is emitted
    /// for the seed.
    pub fn new(initial: D) -> Self {
        Self {
            value: Guarded::new(initial),
            channel: EventChannel::new(),
        }
    }

    /// Replaces the held value. Never fails.
    pub fn update(&self, value: D) -> Result<()> {
        self.value.with_write(|current| {
            let old = current.clone();
            *current = value;
            let new = current.clone();

            let message = ChangeMessage::new(old, new, ChangeType::Update, Metadata::None);
            self.channel.publish(&message);
            Ok(())
        })
    }

    /// Returns a copy of the current value under a shared read.
    pub fn get(&self) -> D {
        self.value.with_read(|v| v.clone())
    }

    /// Subscribes to change messages.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeMessage<D, D>) + Send + Sync + 'static,
    {
        self.channel.subscribe(callback)
    }

    /// Subscribes with a filter chain in front of the callback.
    pub fn subscribe_filtered<G, F>(&self, filter: G, callback: F) -> SubscriptionId
    where
        G: MessageFilter<D, D> + Send + Sync + 'static,
        F: Fn(&ChangeMessage<D, D>) + Send + Sync + 'static,
    {
        self.channel.subscribe_filtered(filter, callback)
    }

    /// Unsubscribes by ID.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.channel.unsubscribe(id)
    }

    /// Returns the number of active subscriptions.
    #[inline]
    pub fn subscription_count(&self) -> usize {
        self.channel.len()
    }

    /// The adapter's event channel.
    #[inline]
    pub fn channel(&self) -> &EventChannel<D, D> {
        &self.channel
    }
}
