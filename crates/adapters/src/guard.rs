//! Reader/writer guard for adapter-owned containers.
//!
//! Every adapter owns exactly one container, wrapped in a `Guarded`.
//! Pure reads take the shared form, mutations take the exclusive form
//! for the full validate, mutate, snapshot, publish sequence. The
//! scoped closures guarantee release on every exit path, including
//! early return on validation failure.

use parking_lot::RwLock;

/// A container behind a reader/writer lock with scoped acquisition.
///
/// Multiple concurrent readers XOR one exclusive writer. The lock is
/// not reentrant: a `with_write` closure must not call back into an
/// operation on the same `Guarded`.
pub struct Guarded<C> {
    inner: RwLock<C>,
}

impl<C> Guarded<C> {
    /// Wraps a container.
    pub fn new(container: C) -> Self {
        Self {
            inner: RwLock::new(container),
        }
    }

    /// Runs `f` with shared read access.
    pub fn with_read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` with exclusive write access.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Consumes the guard, returning the container.
    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }
}
