//! Filter predicates over change messages.
//!
//! Filters are pure, side-effect-free predicates an observer composes in
//! front of its callback to select relevant messages. The two built-in
//! predicates select by change type and by metadata shape; `and` chains
//! predicates by logical AND.

use crate::message::{ChangeMessage, ChangeType, MetadataShape};

/// A pure predicate over change messages.
pub trait MessageFilter<D, M> {
    /// Returns true if the message passes this filter.
    fn matches(&self, message: &ChangeMessage<D, M>) -> bool;

    /// Chains another filter with logical AND.
    fn and<G>(self, other: G) -> And<Self, G>
    where
        Self: Sized,
        G: MessageFilter<D, M>,
    {
        And(self, other)
    }
}

// Ad-hoc predicates: any closure over a message is a filter.
impl<D, M, F> MessageFilter<D, M> for F
where
    F: Fn(&ChangeMessage<D, M>) -> bool,
{
    fn matches(&self, message: &ChangeMessage<D, M>) -> bool {
        self(message)
    }
}

/// Passes messages of one change type.
#[derive(Clone, Copy, Debug)]
pub struct ChangeTypeFilter(pub ChangeType);

impl<D, M> MessageFilter<D, M> for ChangeTypeFilter {
    fn matches(&self, message: &ChangeMessage<D, M>) -> bool {
        message.change_type() == self.0
    }
}

/// Passes messages whose metadata has one shape.
///
/// This lets an observer distinguish a single-item add from a batch add
/// on the same channel: `MetadataFilter(MetadataShape::Batch)` rejects
/// the former and accepts the latter.
#[derive(Clone, Copy, Debug)]
pub struct MetadataFilter(pub MetadataShape);

impl<D, M> MessageFilter<D, M> for MetadataFilter {
    fn matches(&self, message: &ChangeMessage<D, M>) -> bool {
        message.metadata().shape() == self.0
    }
}

/// Logical AND of two filters, built with [`MessageFilter::and`].
#[derive(Clone, Copy, Debug)]
pub struct And<A, B>(pub A, pub B);

impl<D, M, A, B> MessageFilter<D, M> for And<A, B>
where
    A: MessageFilter<D, M>,
    B: MessageFilter<D, M>,
{
    fn matches(&self, message: &ChangeMessage<D, M>) -> bool {
        self.0.matches(message) && self.1.matches(message)
    }
}
