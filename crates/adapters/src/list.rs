//! Ordered-sequence adapter.

use core::mem;

use crate::guard::Guarded;
use herald_channel::{EventChannel, SubscriptionId};
use herald_core::{ChangeMessage, ChangeType, Error, MessageFilter, Metadata, Result};

/// A change-notifying wrapper around an ordered sequence.
///
/// Duplicates are allowed. Every successful mutation publishes one
/// message carrying full before/after snapshots of the sequence plus
/// the element(s) affected. Membership and index checks happen before
/// any mutation, so a rejected call never leaves the sequence
/// half-mutated.
///
/// Subscriber callbacks run while the adapter's write lock is held and
/// must not call back into mutating operations on the same adapter.
pub struct ListAdapter<D> {
    items: Guarded<Vec<D>>,
    channel: EventChannel<Vec<D>, D>,
}

impl<D: Clone + PartialEq + Send + Sync + 'static> Default for ListAdapter<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Clone + PartialEq + Send + Sync + 'static> ListAdapter<D> {
    /// Creates an adapter over an empty sequence.
    pub fn new() -> Self {
        Self::with_initial(Vec::new())
    }

    /// Creates an adapter pre-seeded with `items`. No message is
    /// emitted for the seed.
    pub fn with_initial(items: Vec<D>) -> Self {
        Self {
            items: Guarded::new(items),
            channel: EventChannel::new(),
        }
    }

    /// Appends an item. Never fails.
    pub fn add(&self, item: D) -> Result<()> {
        self.items.with_write(|items| {
            let old = items.clone();
            items.push(item.clone());
            let new = items.clone();

            self.publish(old, new, ChangeType::Add, Metadata::Single(item));
            Ok(())
        })
    }

    /// Inserts an item at `index`. The valid range is `0..=len`; `len`
    /// itself means append.
    pub fn add_at(&self, index: usize, item: D) -> Result<()> {
        self.items.with_write(|items| {
            if index > items.len() {
                return Err(Error::index_out_of_bounds(index, items.len()));
            }

            let old = items.clone();
            items.insert(index, item.clone());
            let new = items.clone();

            self.publish(old, new, ChangeType::Add, Metadata::Single(item));
            Ok(())
        })
    }

    /// Appends every item of `batch`. Never fails.
    pub fn add_all(&self, batch: Vec<D>) -> Result<()> {
        self.items.with_write(|items| {
            let old = items.clone();
            items.extend(batch.iter().cloned());
            let new = items.clone();

            self.publish(old, new, ChangeType::Add, Metadata::Batch(batch));
            Ok(())
        })
    }

    /// Removes the first occurrence of `item` by equality.
    pub fn remove(&self, item: &D) -> Result<()> {
        self.items.with_write(|items| {
            let position = items
                .iter()
                .position(|x| x == item)
                .ok_or(Error::ElementNotFound)?;

            let old = items.clone();
            items.remove(position);
            let new = items.clone();

            self.publish(old, new, ChangeType::Remove, Metadata::Single(item.clone()));
            Ok(())
        })
    }

    /// Removes the element at `index`. The valid range is `0..len`.
    pub fn remove_at(&self, index: usize) -> Result<()> {
        self.items.with_write(|items| {
            if index >= items.len() {
                return Err(Error::index_out_of_bounds(index, items.len()));
            }

            let old = items.clone();
            let removed = items.remove(index);
            let new = items.clone();

            self.publish(old, new, ChangeType::Remove, Metadata::Single(removed));
            Ok(())
        })
    }

    /// Removes one occurrence of every item of `batch`, all or nothing.
    ///
    /// The batch is applied to a scratch copy first; if any element
    /// (counting duplicates) is missing, the live sequence is untouched.
    pub fn remove_all(&self, batch: &[D]) -> Result<()> {
        self.items.with_write(|items| {
            let mut scratch = items.clone();
            for item in batch {
                let position = scratch
                    .iter()
                    .position(|x| x == item)
                    .ok_or(Error::ElementNotFound)?;
                scratch.remove(position);
            }

            let old = mem::replace(items, scratch);
            let new = items.clone();

            self.publish(old, new, ChangeType::Remove, Metadata::Batch(batch.to_vec()));
            Ok(())
        })
    }

    /// Replaces the element at `index`. The valid range is `0..len`.
    pub fn update(&self, index: usize, item: D) -> Result<()> {
        self.items.with_write(|items| {
            if index >= items.len() {
                return Err(Error::index_out_of_bounds(index, items.len()));
            }

            let old = items.clone();
            items[index] = item.clone();
            let new = items.clone();

            self.publish(old, new, ChangeType::Update, Metadata::Single(item));
            Ok(())
        })
    }

    /// Returns a copy of the element at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<D> {
        self.items.with_read(|items| items.get(index).cloned())
    }

    /// Returns a copy of the whole sequence.
    pub fn get_all(&self) -> Vec<D> {
        self.items.with_read(|items| items.clone())
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.with_read(|items| items.len())
    }

    /// Returns true if the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.with_read(|items| items.is_empty())
    }

    /// Subscribes to change messages.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeMessage<Vec<D>, D>) + Send + Sync + 'static,
    {
        self.channel.subscribe(callback)
    }

    /// Subscribes with a filter chain in front of the callback.
    pub fn subscribe_filtered<G, F>(&self, filter: G, callback: F) -> SubscriptionId
    where
        G: MessageFilter<Vec<D>, D> + Send + Sync + 'static,
        F: Fn(&ChangeMessage<Vec<D>, D>) + Send + Sync + 'static,
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
    pub fn channel(&self) -> &EventChannel<Vec<D>, D> {
        &self.channel
    }

    fn publish(&self, old: Vec<D>, new: Vec<D>, change_type: ChangeType, metadata: Metadata<D>) {
        let message = ChangeMessage::new(old, new, change_type, metadata);
        self.channel.publish(&message);
    }
}
