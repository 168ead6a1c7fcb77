use alloc::boxed::Box;

use thiserror::Error;

use crate::info::ValueKind;

// -----------------------------------------------------------------------------
// Error

/// An error returned from reading or writing shared storage: the fields of an
/// object, the elements of a collection, or the static fields of a type.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageError {
    /// The storage is already borrowed by an enclosing access.
    ///
    /// This only happens when a property or pseudo-property closure re-enters
    /// the storage that is currently being read or written.
    #[error("storage is already borrowed by an enclosing access")]
    Busy,

    #[error("slot {slot} is out of bounds for storage of {len} slots")]
    SlotOutOfBounds { slot: usize, len: usize },
}

/// An error returned from a failed write into object storage.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum WriteError {
    #[error("type `{ty}` has no instance field named `{name}`")]
    MissingField { ty: Box<str>, name: Box<str> },

    #[error("expected a value of kind {expected}, found {found}")]
    KindMismatch {
        expected: ValueKind,
        found: &'static str,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
