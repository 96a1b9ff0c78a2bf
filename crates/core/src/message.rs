//! Change message types.
//!
//! A `ChangeMessage` is an immutable record of one completed mutation:
//! the full container state before and after, the kind of mutation, and
//! a metadata payload describing exactly what changed.

use core::fmt;

/// The kind of mutation a change message describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// Elements or entries were added to the container.
    Add,
    /// Elements or entries were removed from the container.
    Remove,
    /// Elements or entries were replaced in place.
    Update,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeType::Add => write!(f, "add"),
            ChangeType::Remove => write!(f, "remove"),
            ChangeType::Update => write!(f, "update"),
        }
    }
}

/// The runtime shape of a message's metadata.
///
/// Used by filters to distinguish single-element operations from batch
/// operations without inspecting the payload itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetadataShape {
    /// No metadata (scalar updates carry none).
    None,
    /// One element or entry.
    Single,
    /// A batch of elements or entries.
    Batch,
}

/// The payload describing what a mutation touched.
///
/// Single-element operations carry `Single`, batch operations carry
/// `Batch`. The scalar adapter's update carries `None` since the new
/// value is already the full new state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Metadata<M> {
    /// No payload.
    None,
    /// The single element or entry affected.
    Single(M),
    /// The elements or entries affected, in argument order.
    Batch(Vec<M>),
}

impl<M> Metadata<M> {
    /// Returns the shape of this payload.
    #[inline]
    pub fn shape(&self) -> MetadataShape {
        match self {
            Metadata::None => MetadataShape::None,
            Metadata::Single(_) => MetadataShape::Single,
            Metadata::Batch(_) => MetadataShape::Batch,
        }
    }

    /// Returns true if there is no payload.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Metadata::None)
    }

    /// Returns true if the payload is a single element.
    #[inline]
    pub fn is_single(&self) -> bool {
        matches!(self, Metadata::Single(_))
    }

    /// Returns true if the payload is a batch.
    #[inline]
    pub fn is_batch(&self) -> bool {
        matches!(self, Metadata::Batch(_))
    }

    /// Returns the single element, if this is a `Single` payload.
    pub fn single(&self) -> Option<&M> {
        match self {
            Metadata::Single(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the batch contents, if this is a `Batch` payload.
    pub fn batch(&self) -> Option<&[M]> {
        match self {
            Metadata::Batch(ms) => Some(ms),
            _ => None,
        }
    }
}

/// An immutable record of one completed mutation.
///
/// `old_data` and `new_data` are independent snapshots of the full
/// container state: mutating the live container after a message was
/// published never alters the message. A message is only constructed
/// after a mutation has succeeded; rejected operations produce nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeMessage<D, M> {
    old_data: D,
    new_data: D,
    change_type: ChangeType,
    metadata: Metadata<M>,
}

impl<D, M> ChangeMessage<D, M> {
    /// Creates a new change message.
    pub fn new(old_data: D, new_data: D, change_type: ChangeType, metadata: Metadata<M>) -> Self {
        Self {
            old_data,
            new_data,
            change_type,
            metadata,
        }
    }

    /// The container state before the mutation.
    #[inline]
    pub fn old_data(&self) -> &D {
        &self.old_data
    }

    /// The container state after the mutation.
    #[inline]
    pub fn new_data(&self) -> &D {
        &self.new_data
    }

    /// The kind of mutation.
    #[inline]
    pub fn change_type(&self) -> ChangeType {
        self.change_type
    }

    /// The payload describing what changed.
    #[inline]
    pub fn metadata(&self) -> &Metadata<M> {
        &self.metadata
    }

    /// Consumes the message, returning its parts.
    pub fn into_parts(self) -> (D, D, ChangeType, Metadata<M>) {
        (self.old_data, self.new_data, self.change_type, self.metadata)
    }
}
