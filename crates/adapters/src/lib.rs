//! Herald Adapters - Change-notifying collection adapters.
//!
//! An adapter is the sole mutation gateway for one container instance.
//! It guards the container with a reader/writer lock, validates
//! preconditions, mutates in place, and publishes an immutable
//! before/after `ChangeMessage` to its event channel while still
//! holding exclusive access. Rejected operations mutate nothing and
//! publish nothing.
//!
//! Four container shapes are covered:
//!
//! - `ScalarAdapter`: a single value
//! - `ListAdapter`: an ordered sequence, duplicates allowed
//! - `MapAdapter`: a key-value mapping with unique keys
//! - `SetAdapter`: a set of unique elements
//!
//! # Example
//!
//! ```rust
//! use herald_adapters::ListAdapter;
//!
//! let list = ListAdapter::new();
//! list.subscribe(|msg| {
//!     println!("{}: {:?} -> {:?}", msg.change_type(), msg.old_data(), msg.new_data());
//! });
//!
//! list.add(1).unwrap();
//! list.add_all(vec![2, 3]).unwrap();
//! assert_eq!(list.get_all(), vec![1, 2, 3]);
//! ```

mod guard;
mod list;
mod map;
mod scalar;
mod set;

pub use guard::Guarded;
pub use list::ListAdapter;
pub use map::MapAdapter;
pub use scalar::ScalarAdapter;
pub use set::SetAdapter;
