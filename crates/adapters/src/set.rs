//! Unique-element set adapter.

use core::hash::Hash;

use crate::guard::Guarded;
use hashbrown::HashSet;
use herald_channel::{EventChannel, SubscriptionId};
use herald_core::{ChangeMessage, ChangeType, Error, MessageFilter, Metadata, Result};

/// A change-notifying wrapper around a set of unique elements.
///
/// Batch operations follow the same any-member-fails policy as the
/// list and map adapters: `add_all` is rejected if any element is
/// already a member, `remove_all` if any element is not.
///
/// Subscriber callbacks run while the adapter's write lock is held and
/// must not call back into mutating operations on the same adapter.
pub struct SetAdapter<D> {
    items: Guarded<HashSet<D>>,
    channel: EventChannel<HashSet<D>, D>,
}

impl<D: Clone + Eq + Hash + Send + Sync + 'static> Default for SetAdapter<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Clone + Eq + Hash + Send + Sync + 'static> SetAdapter<D> {
    /// Creates an adapter over an empty set.
    pub fn new() -> Self {
        Self::with_initial(HashSet::new())
    }

    /// Creates an adapter pre-seeded with `items`. No message is
    /// emitted for the seed.
    pub fn with_initial(items: HashSet<D>) -> Self {
        Self {
            items: Guarded::new(items),
            channel: EventChannel::new(),
        }
    }

    /// Inserts an element. Fails if it is already a member.
    pub fn add(&self, item: D) -> Result<()> {
        self.items.with_write(|items| {
            if items.contains(&item) {
                return Err(Error::DuplicateElement);
            }

            let old = items.clone();
            items.insert(item.clone());
            let new = items.clone();

            self.publish(old, new, ChangeType::Add, Metadata::Single(item));
            Ok(())
        })
    }

    /// Inserts every element of `batch`, all or nothing.
    ///
    /// Fails if any element is already a member or is duplicated
    /// within the batch itself.
    pub fn add_all(&self, batch: Vec<D>) -> Result<()> {
        self.items.with_write(|items| {
            let mut seen = HashSet::new();
            for item in &batch {
                if items.contains(item) || !seen.insert(item.clone()) {
                    return Err(Error::DuplicateElement);
                }
            }

            let old = items.clone();
            for item in &batch {
                items.insert(item.clone());
            }
            let new = items.clone();

            self.publish(old, new, ChangeType::Add, Metadata::Batch(batch));
            Ok(())
        })
    }

    /// Removes an element. Fails if it is not a member.
    pub fn remove(&self, item: &D) -> Result<()> {
        self.items.with_write(|items| {
            if !items.contains(item) {
                return Err(Error::ElementNotFound);
            }

            let old = items.clone();
            items.remove(item);
            let new = items.clone();

            self.publish(old, new, ChangeType::Remove, Metadata::Single(item.clone()));
            Ok(())
        })
    }

    /// Removes every element of `batch`, all or nothing.
    pub fn remove_all(&self, batch: &[D]) -> Result<()> {
        self.items.with_write(|items| {
            for item in batch {
                if !items.contains(item) {
                    return Err(Error::ElementNotFound);
                }
            }

            let old = items.clone();
            for item in batch {
                items.remove(item);
            }
            let new = items.clone();

            self.publish(old, new, ChangeType::Remove, Metadata::Batch(batch.to_vec()));
            Ok(())
        })
    }

    /// Returns true if `item` is a member.
    pub fn contains(&self, item: &D) -> bool {
        self.items.with_read(|items| items.contains(item))
    }

    /// Returns a copy of the whole set.
    pub fn get_all(&self) -> HashSet<D> {
        self.items.with_read(|items| items.clone())
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.with_read(|items| items.len())
    }

    /// Returns true if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.with_read(|items| items.is_empty())
    }

    /// Subscribes to change messages.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeMessage<HashSet<D>, D>) + Send + Sync + 'static,
    {
        self.channel.subscribe(callback)
    }

    /// Subscribes with a filter chain in front of the callback.
    pub fn subscribe_filtered<G, F>(&self, filter: G, callback: F) -> SubscriptionId
    where
        G: MessageFilter<HashSet<D>, D> + Send + Sync + 'static,
        F: Fn(&ChangeMessage<HashSet<D>, D>) + Send + Sync + 'static,
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
    pub fn channel(&self) -> &EventChannel<HashSet<D>, D> {
        &self.channel
    }

    fn publish(
        &self,
        old: HashSet<D>,
        new: HashSet<D>,
        change_type: ChangeType,
        metadata: Metadata<D>,
    ) {
        let message = ChangeMessage::new(old, new, change_type, metadata);
        self.channel.publish(&message);
    }
}
