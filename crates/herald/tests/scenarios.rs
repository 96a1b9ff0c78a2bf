//! End-to-end scenarios across adapters, channels and filters.

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use herald::{
    ChangeMessage, ChangeType, ChangeTypeFilter, Error, ListAdapter, MapAdapter, MessageFilter,
    Metadata, MetadataFilter, MetadataShape, ScalarAdapter, SetAdapter,
};
use parking_lot::Mutex;

#[test]
fn list_scenario_single_then_batch() {
    let list = ListAdapter::new();

    let messages = Arc::new(Mutex::new(Vec::new()));
    let messages_clone = messages.clone();
    list.subscribe(move |msg| messages_clone.lock().push(msg.clone()));

    list.add(1).unwrap();
    list.add_all(vec![2, 3, 4]).unwrap();

    let messages = messages.lock();
    assert_eq!(messages.len(), 2);

    assert_eq!(messages[0].old_data(), &Vec::<i32>::new());
    assert_eq!(messages[0].new_data(), &vec![1]);
    assert_eq!(messages[0].change_type(), ChangeType::Add);
    assert_eq!(messages[0].metadata(), &Metadata::Single(1));

    assert_eq!(messages[1].old_data(), &vec![1]);
    assert_eq!(messages[1].new_data(), &vec![1, 2, 3, 4]);
    assert_eq!(messages[1].change_type(), ChangeType::Add);
    assert_eq!(messages[1].metadata(), &Metadata::Batch(vec![2, 3, 4]));
}

#[test]
fn map_scenario_duplicate_key_rejected() {
    let map = MapAdapter::new();

    let messages = Arc::new(Mutex::new(Vec::new()));
    let messages_clone = messages.clone();
    map.subscribe(move |msg| messages_clone.lock().push(msg.clone()));

    map.add(0, "0".to_string()).unwrap();
    map.add(1, "1".to_string()).unwrap();
    assert_eq!(map.add(0, "x".to_string()), Err(Error::DuplicateKey));

    let expected: HashMap<i32, String> =
        [(0, "0".to_string()), (1, "1".to_string())].into_iter().collect();
    assert_eq!(map.get_all(), expected);

    let messages = messages.lock();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].metadata(), &Metadata::Single((0, "0".to_string())));
    assert_eq!(messages[1].metadata(), &Metadata::Single((1, "1".to_string())));
}

#[test]
fn set_scenario_batch_then_duplicate_add() {
    let set = SetAdapter::new();

    let messages = Arc::new(Mutex::new(Vec::new()));
    let messages_clone = messages.clone();
    set.subscribe(move |msg| messages_clone.lock().push(msg.clone()));

    set.add_all(vec![0, 1, 2]).unwrap();
    assert_eq!(set.add(1), Err(Error::DuplicateElement));

    let expected: HashSet<i32> = [0, 1, 2].iter().copied().collect();
    assert_eq!(set.get_all(), expected);

    let messages = messages.lock();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].metadata(), &Metadata::Batch(vec![0, 1, 2]));
}

#[test]
fn metadata_shape_distinguishes_single_from_batch() {
    let list = ListAdapter::new();

    let batches = Arc::new(Mutex::new(Vec::new()));
    let singles = Arc::new(Mutex::new(Vec::new()));

    let batches_clone = batches.clone();
    list.subscribe_filtered(MetadataFilter(MetadataShape::Batch), move |msg| {
        batches_clone.lock().push(msg.clone());
    });
    let singles_clone = singles.clone();
    list.subscribe_filtered(MetadataFilter(MetadataShape::Single), move |msg| {
        singles_clone.lock().push(msg.clone());
    });

    list.add(5).unwrap();
    list.add_all(vec![6, 7]).unwrap();

    assert_eq!(singles.lock().len(), 1);
    assert_eq!(singles.lock()[0].metadata(), &Metadata::Single(5));
    assert_eq!(batches.lock().len(), 1);
    assert_eq!(batches.lock()[0].metadata(), &Metadata::Batch(vec![6, 7]));
}

#[test]
fn composed_filter_selects_batch_removals_only() {
    let list = ListAdapter::with_initial(vec![1, 2, 3, 4]);

    let hits = Arc::new(Mutex::new(Vec::new()));
    let hits_clone = hits.clone();
    let filter = <ChangeTypeFilter as MessageFilter<Vec<i32>, i32>>::and(
        ChangeTypeFilter(ChangeType::Remove),
        MetadataFilter(MetadataShape::Batch),
    );
    list.subscribe_filtered(filter, move |msg| hits_clone.lock().push(msg.clone()));

    list.add(5).unwrap(); // add, single
    list.remove(&1).unwrap(); // remove, single
    list.remove_all(&[2, 3]).unwrap(); // remove, batch

    let hits = hits.lock();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].metadata(), &Metadata::Batch(vec![2, 3]));
}

#[test]
fn scalar_update_round_trip() {
    let scalar = ScalarAdapter::new("initial".to_string());

    let messages = Arc::new(Mutex::new(Vec::new()));
    let messages_clone = messages.clone();
    scalar.subscribe(move |msg| messages_clone.lock().push(msg.clone()));

    scalar.update("next".to_string()).unwrap();

    assert_eq!(scalar.get(), "next");
    let messages = messages.lock();
    assert_eq!(messages[0].old_data(), "initial");
    assert_eq!(messages[0].new_data(), "next");
    assert!(messages[0].metadata().is_none());
}

#[test]
fn concurrent_writers_publish_in_mutation_order() {
    use std::thread;

    let list = Arc::new(ListAdapter::new());

    let messages: Arc<Mutex<Vec<ChangeMessage<Vec<i64>, i64>>>> =
        Arc::new(Mutex::new(Vec::new()));
    let messages_clone = messages.clone();
    list.subscribe(move |msg| messages_clone.lock().push(msg.clone()));

    let mut handles = Vec::new();
    for t in 0..4i64 {
        let list = list.clone();
        handles.push(thread::spawn(move || {
            for i in 0..25 {
                list.add(t * 100 + i).unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let messages = messages.lock();
    assert_eq!(messages.len(), 100);

    // Messages chain: each new snapshot is the next message's old one,
    // regardless of which thread performed the mutation.
    for window in messages.windows(2) {
        assert_eq!(window[0].new_data(), window[1].old_data());
    }
    assert_eq!(messages.last().unwrap().new_data().len(), 100);
    assert_eq!(list.len(), 100);
}

#[test]
fn concurrent_readers_see_consistent_snapshots() {
    use std::thread;

    let map: Arc<MapAdapter<i64, i64>> = Arc::new(MapAdapter::new());
    for k in 0..10 {
        map.add(k, k).unwrap();
    }

    let mut handles = Vec::new();
    for _ in 0..4 {
        let map = map.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                let snapshot = map.get_all();
                // A snapshot is internally consistent even while a
                // writer is interleaving.
                assert!(snapshot.len() >= 10);
            }
        }));
    }

    for k in 10..60 {
        map.add(k, k).unwrap();
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(map.len(), 60);
}

#[test]
fn late_subscriber_receives_no_replay() {
    let list = ListAdapter::new();
    list.add(1).unwrap();

    let count = Arc::new(Mutex::new(0));
    let count_clone = count.clone();
    list.subscribe(move |_| *count_clone.lock() += 1);

    assert_eq!(*count.lock(), 0);
    list.add(2).unwrap();
    assert_eq!(*count.lock(), 1);
}

#[test]
fn rejected_operations_never_reach_observers() {
    let map = MapAdapter::new();
    map.add(1, "one".to_string()).unwrap();

    let count = Arc::new(Mutex::new(0));
    let count_clone = count.clone();
    map.subscribe(move |_| *count_clone.lock() += 1);

    assert!(map.add(1, "dup".to_string()).is_err());
    assert!(map.remove(&9).is_err());
    assert!(map.update(9, "x".to_string()).is_err());
    assert!(map.remove_all(&[1, 9]).is_err());

    assert_eq!(*count.lock(), 0);
    assert_eq!(map.len(), 1);
}
