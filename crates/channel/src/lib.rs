//! Herald Channel - Multicast event channel for Herald adapters.
//!
//! Adapters publish one `ChangeMessage` per successful mutation to their
//! channel; observers subscribe, optionally behind a filter chain, and
//! receive messages synchronously in publish order. The channel is
//! replay-free: a new subscriber never sees past messages.
//!
//! # Example
//!
//! ```rust
//! use herald_channel::EventChannel;
//! use herald_core::{ChangeMessage, ChangeType, Metadata};
//!
//! let channel: EventChannel<Vec<i32>, i32> = EventChannel::new();
//!
//! let id = channel.subscribe(|msg| {
//!     println!("{}: {:?} -> {:?}", msg.change_type(), msg.old_data(), msg.new_data());
//! });
//!
//! let msg = ChangeMessage::new(vec![], vec![1], ChangeType::Add, Metadata::Single(1));
//! channel.publish(&msg);
//!
//! channel.unsubscribe(id);
//! ```

mod subscription;

pub use subscription::{ChangeCallback, EventChannel, Subscription, SubscriptionId};
