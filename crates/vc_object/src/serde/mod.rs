//! Export object graphs through `serde`.
//!
//! [`Value`] implements [`Serialize`], so any value can be handed to a serde
//! data format, for snapshots and diagnostics:
//!
//! - primitives map to the matching serde primitive and `Null` to `none`;
//! - objects and structs map to a map from field name to value, base class
//!   fields first (a shadowed field appears once per declaring type);
//! - arrays and lists map to sequences.
//!
//! Object graphs may contain reference cycles, so nesting deeper than
//! [`MAX_DEPTH`] is reported as a serializer error.
//!
//! There is no deserialization: values are only created through their
//! [`Type`](crate::Type).
//!
//! [`Value`]: crate::Value
//! [`Serialize`]: serde_core::Serialize

// -----------------------------------------------------------------------------
// Modules

mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use ser::{GraphSerializer, MAX_DEPTH};
