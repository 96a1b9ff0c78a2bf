//! Key-value map adapter.

use core::hash::Hash;

use crate::guard::Guarded;
use hashbrown::{HashMap, HashSet};
use herald_channel::{EventChannel, SubscriptionId};
use herald_core::{ChangeMessage, ChangeType, Error, MessageFilter, Metadata, Result};

/// A change-notifying wrapper around a key-value mapping with unique
/// keys.
///
/// Metadata carries the entry or entries affected as `(key, value)`
/// pairs. Batch operations are all or nothing: key existence is
/// validated for the whole batch before any mutation is applied.
///
/// Subscriber callbacks run while the adapter's write lock is held and
/// must not call back into mutating operations on the same adapter.
pub struct MapAdapter<K, D> {
    entries: Guarded<HashMap<K, D>>,
    channel: EventChannel<HashMap<K, D>, (K, D)>,
}

impl<K, D> Default for MapAdapter<K, D>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    D: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, D> MapAdapter<K, D>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    D: Clone + Send + Sync + 'static,
{
    /// Creates an adapter over an empty map.
    pub fn new() -> Self {
        Self::with_initial(HashMap::new())
    }

    /// Creates an adapter pre-seeded with `entries`. No message is
    /// emitted for the seed.
    pub fn with_initial(entries: HashMap<K, D>) -> Self {
        Self {
            entries: Guarded::new(entries),
            channel: EventChannel::new(),
        }
    }

    /// Inserts an entry. Fails if the key is already present.
    pub fn add(&self, key: K, value: D) -> Result<()> {
        self.entries.with_write(|entries| {
            if entries.contains_key(&key) {
                return Err(Error::DuplicateKey);
            }

            let old = entries.clone();
            entries.insert(key.clone(), value.clone());
            let new = entries.clone();

            self.publish(old, new, ChangeType::Add, Metadata::Single((key, value)));
            Ok(())
        })
    }

    /// Inserts every entry of `batch`, all or nothing.
    ///
    /// Fails if any key already exists in the map or is duplicated
    /// within the batch itself.
    pub fn add_all(&self, batch: Vec<(K, D)>) -> Result<()> {
        self.entries.with_write(|entries| {
            let mut seen = HashSet::new();
            for (key, _) in &batch {
                if entries.contains_key(key) || !seen.insert(key.clone()) {
                    return Err(Error::DuplicateKey);
                }
            }

            let old = entries.clone();
            for (key, value) in &batch {
                entries.insert(key.clone(), value.clone());
            }
            let new = entries.clone();

            self.publish(old, new, ChangeType::Add, Metadata::Batch(batch));
            Ok(())
        })
    }

    /// Removes an entry by key. Fails if the key is absent. Metadata
    /// carries the removed entry.
    pub fn remove(&self, key: &K) -> Result<()> {
        self.entries.with_write(|entries| {
            if !entries.contains_key(key) {
                return Err(Error::KeyNotFound);
            }

            let old = entries.clone();
            let value = entries.remove(key).ok_or(Error::KeyNotFound)?;
            let new = entries.clone();

            self.publish(
                old,
                new,
                ChangeType::Remove,
                Metadata::Single((key.clone(), value)),
            );
            Ok(())
        })
    }

    /// Removes every key of `keys`, all or nothing.
    ///
    /// Metadata carries the subset of the pre-mutation map restricted
    /// to those keys.
    pub fn remove_all(&self, keys: &[K]) -> Result<()> {
        self.entries.with_write(|entries| {
            for key in keys {
                if !entries.contains_key(key) {
                    return Err(Error::KeyNotFound);
                }
            }

            let old = entries.clone();
            let mut removed = Vec::with_capacity(keys.len());
            for key in keys {
                if let Some(value) = entries.remove(key) {
                    removed.push((key.clone(), value));
                }
            }
            let new = entries.clone();

            self.publish(old, new, ChangeType::Remove, Metadata::Batch(removed));
            Ok(())
        })
    }

    /// Replaces the value for `key`. Fails if the key is absent.
    pub fn update(&self, key: K, value: D) -> Result<()> {
        self.entries.with_write(|entries| {
            if !entries.contains_key(&key) {
                return Err(Error::KeyNotFound);
            }

            let old = entries.clone();
            entries.insert(key.clone(), value.clone());
            let new = entries.clone();

            self.publish(old, new, ChangeType::Update, Metadata::Single((key, value)));
            Ok(())
        })
    }

    /// Replaces the value for every key of `batch`, all or nothing.
    pub fn update_all(&self, batch: Vec<(K, D)>) -> Result<()> {
        self.entries.with_write(|entries| {
            for (key, _) in &batch {
                if !entries.contains_key(key) {
                    return Err(Error::KeyNotFound);
                }
            }

            let old = entries.clone();
            for (key, value) in &batch {
                entries.insert(key.clone(), value.clone());
            }
            let new = entries.clone();

            self.publish(old, new, ChangeType::Update, Metadata::Batch(batch));
            Ok(())
        })
    }

    /// Returns a copy of the value for `key`, if present.
    pub fn get(&self, key: &K) -> Option<D> {
        self.entries.with_read(|entries| entries.get(key).cloned())
    }

    /// Returns a copy of the whole map.
    pub fn get_all(&self) -> HashMap<K, D> {
        self.entries.with_read(|entries| entries.clone())
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.with_read(|entries| entries.contains_key(key))
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.with_read(|entries| entries.len())
    }

    /// Returns true if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.with_read(|entries| entries.is_empty())
    }

    /// Subscribes to change messages.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangeMessage<HashMap<K, D>, (K, D)>) + Send + Sync + 'static,
    {
        self.channel.subscribe(callback)
    }

    /// Subscribes with a filter chain in front of the callback.
    pub fn subscribe_filtered<G, F>(&self, filter: G, callback: F) -> SubscriptionId
    where
        G: MessageFilter<HashMap<K, D>, (K, D)> + Send + Sync + 'static,
        F: Fn(&ChangeMessage<HashMap<K, D>, (K, D)>) + Send + Sync + 'static,
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
    pub fn channel(&self) -> &EventChannel<HashMap<K, D>, (K, D)> {
        &self.channel
    }

    fn publish(
        &self,
        old: HashMap<K, D>,
        new: HashMap<K, D>,
        change_type: ChangeType,
        metadata: Metadata<(K, D)>,
    ) {
        let message = ChangeMessage::new(old, new, change_type, metadata);
        self.channel.publish(&message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    type Msg = ChangeMessage<HashMap<i32, String>, (i32, String)>;
    type Recorded = Arc<Mutex<Vec<Msg>>>;

    fn recording(adapter: &MapAdapter<i32, String>) -> Recorded {
        let messages: Recorded = Arc::new(Mutex::new(Vec::new()));
        let messages_clone = messages.clone();
        adapter.subscribe(move |msg| messages_clone.lock().push(msg.clone()));
        messages
    }

    #[test]
    fn test_add_and_duplicate_key_scenario() {
        let adapter = MapAdapter::new();
        let messages = recording(&adapter);

        adapter.add(0, "0".to_string()).unwrap();
        adapter.add(1, "1".to_string()).unwrap();

        // Duplicate key: rejected, container unchanged
        assert_eq!(adapter.add(0, "x".to_string()), Err(Error::DuplicateKey));

        let expected: HashMap<i32, String> =
            [(0, "0".to_string()), (1, "1".to_string())].into_iter().collect();
        assert_eq!(adapter.get_all(), expected);

        let messages = messages.lock();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].metadata(), &Metadata::Single((0, "0".to_string())));
        assert_eq!(messages[1].metadata(), &Metadata::Single((1, "1".to_string())));
    }

    #[test]
    fn test_add_all_any_existing_key_fails() {
        let adapter = MapAdapter::new();
        adapter.add(1, "1".to_string()).unwrap();
        let messages = recording(&adapter);

        let err = adapter.add_all(vec![(2, "2".to_string()), (1, "dup".to_string())]);
        assert_eq!(err, Err(Error::DuplicateKey));
        assert_eq!(adapter.len(), 1);
        assert!(messages.lock().is_empty());

        adapter
            .add_all(vec![(2, "2".to_string()), (3, "3".to_string())])
            .unwrap();
        assert_eq!(adapter.len(), 3);
        assert_eq!(
            messages.lock()[0].metadata(),
            &Metadata::Batch(vec![(2, "2".to_string()), (3, "3".to_string())])
        );
    }

    #[test]
    fn test_add_all_intra_batch_duplicate_fails() {
        let adapter: MapAdapter<i32, String> = MapAdapter::new();

        let err = adapter.add_all(vec![(1, "a".to_string()), (1, "b".to_string())]);
        assert_eq!(err, Err(Error::DuplicateKey));
        assert!(adapter.is_empty());
    }

    #[test]
    fn test_remove_carries_removed_entry() {
        let adapter = MapAdapter::new();
        adapter.add(1, "one".to_string()).unwrap();
        let messages = recording(&adapter);

        adapter.remove(&1).unwrap();
        assert!(adapter.is_empty());

        let messages_guard = messages.lock();
        assert_eq!(messages_guard[0].change_type(), ChangeType::Remove);
        assert_eq!(
            messages_guard[0].metadata(),
            &Metadata::Single((1, "one".to_string()))
        );
        drop(messages_guard);

        assert_eq!(adapter.remove(&1), Err(Error::KeyNotFound));
        assert_eq!(messages.lock().len(), 1);
    }

    #[test]
    fn test_remove_all_all_or_nothing() {
        let adapter = MapAdapter::new();
        adapter
            .add_all(vec![(1, "1".to_string()), (2, "2".to_string()), (3, "3".to_string())])
            .unwrap();
        let messages = recording(&adapter);

        assert_eq!(adapter.remove_all(&[1, 9]), Err(Error::KeyNotFound));
        assert_eq!(adapter.len(), 3);
        assert!(messages.lock().is_empty());

        adapter.remove_all(&[3, 1]).unwrap();
        assert_eq!(adapter.len(), 1);
        assert!(adapter.contains_key(&2));

        // Metadata is the pre-mutation entries for the removed keys
        assert_eq!(
            messages.lock()[0].metadata(),
            &Metadata::Batch(vec![(3, "3".to_string()), (1, "1".to_string())])
        );
    }

    #[test]
    fn test_update_requires_existing_key() {
        let adapter = MapAdapter::new();
        adapter.add(1, "one".to_string()).unwrap();
        let messages = recording(&adapter);

        adapter.update(1, "uno".to_string()).unwrap();
        assert_eq!(adapter.get(&1), Some("uno".to_string()));
        assert_eq!(
            messages.lock()[0].metadata(),
            &Metadata::Single((1, "uno".to_string()))
        );

        assert_eq!(adapter.update(2, "two".to_string()), Err(Error::KeyNotFound));
        assert_eq!(messages.lock().len(), 1);
    }

    #[test]
    fn test_update_all_all_or_nothing() {
        let adapter = MapAdapter::new();
        adapter
            .add_all(vec![(1, "1".to_string()), (2, "2".to_string())])
            .unwrap();
        let messages = recording(&adapter);

        let err = adapter.update_all(vec![(1, "a".to_string()), (9, "z".to_string())]);
        assert_eq!(err, Err(Error::KeyNotFound));
        assert_eq!(adapter.get(&1), Some("1".to_string()));
        assert!(messages.lock().is_empty());

        adapter
            .update_all(vec![(1, "a".to_string()), (2, "b".to_string())])
            .unwrap();
        assert_eq!(adapter.get(&1), Some("a".to_string()));
        assert_eq!(adapter.get(&2), Some("b".to_string()));
        assert_eq!(messages.lock()[0].change_type(), ChangeType::Update);
    }

    #[test]
    fn test_reads_return_copies() {
        let adapter = MapAdapter::new();
        adapter.add(1, "one".to_string()).unwrap();

        let mut copy = adapter.get_all();
        copy.insert(2, "two".to_string());

        assert_eq!(adapter.len(), 1);
        assert_eq!(adapter.get(&2), None);
    }

    #[test]
    fn test_snapshots_survive_later_mutation() {
        let adapter = MapAdapter::new();
        let messages = recording(&adapter);

        adapter.add(1, "one".to_string()).unwrap();
        let first = messages.lock()[0].clone();

        adapter.update(1, "uno".to_string()).unwrap();
        adapter.remove(&1).unwrap();

        assert!(first.old_data().is_empty());
        assert_eq!(first.new_data().get(&1), Some(&"one".to_string()));
    }
}
