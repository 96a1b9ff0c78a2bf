//! Herald - Reactive change-notification wrappers around mutable
//! collections.
//!
//! All mutation happens through an adapter that performs the change
//! under a reader/writer lock, then publishes an immutable before/after
//! snapshot plus a description of exactly what changed to any number of
//! subscribed observers.
//!
//! # Core Concepts
//!
//! - `ChangeMessage`: Immutable record of one completed mutation
//!   (before/after snapshots, change type, metadata)
//! - `Metadata`: Tagged payload describing what changed (none, single
//!   element, or batch)
//! - `EventChannel`: Multicast, synchronous, replay-free channel
//! - Adapters: `ScalarAdapter`, `ListAdapter`, `MapAdapter`,
//!   `SetAdapter` — one per container shape
//! - Filters: `ChangeTypeFilter`, `MetadataFilter`, composed with
//!   [`MessageFilter::and`]
//!
//! # Example
//!
//! ```rust
//! use herald::{ChangeType, ChangeTypeFilter, ListAdapter, MessageFilter};
//!
//! let list = ListAdapter::new();
//!
//! list.subscribe_filtered(ChangeTypeFilter(ChangeType::Add), |msg| {
//!     println!("added: {:?}", msg.metadata());
//! });
//!
//! list.add(1).unwrap();
//! list.add_all(vec![2, 3]).unwrap();
//! assert!(list.remove(&9).is_err()); // rejected: nothing published
//! ```

pub use herald_adapters::{Guarded, ListAdapter, MapAdapter, ScalarAdapter, SetAdapter};
pub use herald_channel::{ChangeCallback, EventChannel, Subscription, SubscriptionId};
pub use herald_core::{
    And, ChangeMessage, ChangeType, ChangeTypeFilter, Error, MessageFilter, Metadata,
    MetadataFilter, MetadataShape, Result,
};
