#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod hash;

pub mod info;
pub mod ops;
pub mod registry;
pub mod serde;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{StorageError, WriteError};
pub use info::{MemberInfo, MemberKind, Type, TypeInfo, TypeKind, ValueKind, Visibility};
pub use registry::{TypeBuilder, TypeRegistry};
pub use value::{ArrayRef, FromValue, ListRef, ObjectRef, StructValue, Value};
