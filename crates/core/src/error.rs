//! Error types for Herald adapters.

use core::fmt;

/// Result type alias for Herald operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Precondition violations surfaced by adapter operations.
///
/// These are expected, recoverable conditions: the operation did not
/// mutate the container and no message was published. Batch operations
/// report the cause of the first offending member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Index outside the valid range for the operation.
    IndexOutOfBounds { index: usize, len: usize },
    /// Element not present in the container.
    ElementNotFound,
    /// Element already present in the container.
    DuplicateElement,
    /// Key not present in the map.
    KeyNotFound,
    /// Key already present in the map.
    DuplicateKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "Index {} out of bounds (len {})", index, len)
            }
            Error::ElementNotFound => write!(f, "Element not found"),
            Error::DuplicateElement => write!(f, "Element already present"),
            Error::KeyNotFound => write!(f, "Key not found"),
            Error::DuplicateKey => write!(f, "Key already present"),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Creates an index out of bounds error.
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds { index, len }
    }
}
