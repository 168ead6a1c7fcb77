//! Declaring and looking up types.
//!
//! - [`TypeBuilder`] declares one class or struct and produces its [`Type`].
//! - [`TypeRegistry`] stores types by name, so that callers holding only a
//!   type name can create instances.
//!
//! [`Type`]: crate::Type

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use builder::{BuildError, TypeBuilder};
pub use type_registry::TypeRegistry;
