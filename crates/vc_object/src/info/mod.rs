//! Runtime type information.
//!
//! A [`Type`] is a shared handle to a [`TypeInfo`], which describes one class
//! or struct: its name, its [`TypeKind`], its optional base class, and the
//! [`MemberInfo`]s it declares.
//!
//! Types are created with [`TypeBuilder`](crate::registry::TypeBuilder) and
//! never change afterwards, except for the values held in their static
//! fields.

// -----------------------------------------------------------------------------
// Modules

mod member_info;
mod type_info;
mod value_kind;

// -----------------------------------------------------------------------------
// Exports

pub use member_info::{Getter, MemberInfo, MemberKind, Method, Setter, Visibility};
pub use type_info::{Ancestors, Type, TypeInfo, TypeKind};
pub use value_kind::ValueKind;

pub(crate) use member_info::FieldInit;
