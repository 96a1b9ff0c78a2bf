//! Herald Core - Change message and filter types for Herald.
//!
//! This crate provides the foundational types for the Herald reactive
//! collection library:
//!
//! - `ChangeType`: The kind of mutation (Add, Remove, Update)
//! - `Metadata`: Tagged payload describing what changed (none, single, batch)
//! - `ChangeMessage`: Immutable before/after record of one mutation
//! - `MessageFilter`: Pure predicates observers compose to select messages
//! - `Error`: Precondition violations surfaced by adapter operations
//!
//! # Example
//!
//! ```rust
//! use herald_core::{ChangeMessage, ChangeType, Metadata, MetadataShape};
//! use herald_core::{ChangeTypeFilter, MessageFilter, MetadataFilter};
//!
//! let msg = ChangeMessage::new(
//!     vec![1],
//!     vec![1, 2, 3],
//!     ChangeType::Add,
//!     Metadata::Batch(vec![2, 3]),
//! );
//!
//! let filter = <ChangeTypeFilter as MessageFilter<Vec<i32>, i32>>::and(
//!     ChangeTypeFilter(ChangeType::Add),
//!     MetadataFilter(MetadataShape::Batch),
//! );
//! assert!(filter.matches(&msg));
//! ```

mod error;
mod filter;
mod message;

pub use error::{Error, Result};
pub use filter::{And, ChangeTypeFilter, MessageFilter, MetadataFilter};
pub use message::{ChangeMessage, ChangeType, Metadata, MetadataShape};
