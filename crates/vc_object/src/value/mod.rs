//! Runtime values.
//!
//! A [`Value`] is either a primitive, null, or one of four composite
//! variants whose cloning behaviour mirrors their runtime semantics:
//!
//! - [`ObjectRef`], [`ArrayRef`] and [`ListRef`] are *references*: cloning
//!   them yields another handle to the same storage, and writes through any
//!   handle are visible through every other handle.
//! - [`StructValue`] is a *value*: cloning it copies its fields, so a write
//!   into a copy is never observed by the value it was copied from.
//!
//! Reading a field always clones the stored [`Value`]. Reading a struct field
//! therefore yields a detached copy, which is why [`Value::is_by_value`]
//! exists.

// -----------------------------------------------------------------------------
// Modules

mod collection;
mod convert;
mod object;

// -----------------------------------------------------------------------------
// Exports

pub use collection::{ArrayRef, ListRef};
pub use convert::FromValue;
pub use object::{ObjectRef, StructValue};

// -----------------------------------------------------------------------------
// Value

use alloc::rc::Rc;
use core::fmt;

use crate::info::Type;
use crate::ops::OrderedCollection;

/// A dynamically typed value in an object graph.
///
/// # Examples
///
/// ```
/// use vc_object::{ListRef, Value};
///
/// let list = Value::List(ListRef::from_iter([Value::Int(1)]));
/// let alias = list.clone();
///
/// // Both handles see the same storage.
/// alias.as_list().unwrap().push(Value::Int(2));
/// assert_eq!(list.as_list().unwrap().len(), 2);
/// assert!(!list.is_by_value());
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(Rc<str>),
    Struct(StructValue),
    Object(ObjectRef),
    Array(ArrayRef),
    List(ListRef),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this value is a copy rather than a handle to shared
    /// storage.
    ///
    /// A write *into* a by-value container (a field of a [`StructValue`]
    /// obtained by reading another field) cannot be observed by the graph the
    /// container was read from.
    #[inline]
    pub fn is_by_value(&self) -> bool {
        !matches!(self, Self::Object(_) | Self::Array(_) | Self::List(_))
    }

    /// Returns the name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Char(_) => "Char",
            Self::Str(_) => "Str",
            Self::Struct(_) => "Struct",
            Self::Object(_) => "Object",
            Self::Array(_) => "Array",
            Self::List(_) => "List",
        }
    }

    /// Returns the runtime type of objects and structs.
    ///
    /// Primitives and collections have no declared members and return `None`.
    #[inline]
    pub fn ty(&self) -> Option<&Type> {
        match self {
            Self::Struct(val) => Some(val.ty()),
            Self::Object(obj) => Some(obj.ty()),
            _ => None,
        }
    }

    /// Views arrays and lists as an [`OrderedCollection`].
    #[inline]
    pub fn as_collection(&self) -> Option<&dyn OrderedCollection> {
        match self {
            Self::Array(array) => Some(array),
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(val) => Some(*val),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(val) => Some(*val),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(val) => Some(*val),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(val) => Some(val),
            _ => None,
        }
    }

    #[inline]
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(val) => Some(val),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&ListRef> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }
}

/// Primitives and structs compare by value, references by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Struct(a), Self::Struct(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Array(a), Self::Array(b)) => a.ptr_eq(b),
            (Self::List(a), Self::List(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(val) => write!(f, "Bool({val})"),
            Self::Int(val) => write!(f, "Int({val})"),
            Self::Float(val) => write!(f, "Float({val:?})"),
            Self::Char(val) => write!(f, "Char({val:?})"),
            Self::Str(val) => write!(f, "Str({val:?})"),
            Self::Struct(val) => fmt::Debug::fmt(val, f),
            Self::Object(obj) => fmt::Debug::fmt(obj, f),
            Self::Array(array) => fmt::Debug::fmt(array, f),
            Self::List(list) => fmt::Debug::fmt(list, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeBuilder;
    use crate::info::ValueKind;

    #[test]
    fn struct_clone_is_detached() {
        let point = TypeBuilder::structure("Point")
            .field("x", ValueKind::Int)
            .build()
            .unwrap();

        let original = point.new_instance();
        let mut copy = original.clone();
        match &mut copy {
            Value::Struct(val) => val.set_field("x", 5).unwrap(),
            _ => unreachable!(),
        }

        assert_eq!(original.as_struct().unwrap().field("x"), Some(&Value::Int(0)));
        assert_eq!(copy.as_struct().unwrap().field("x"), Some(&Value::Int(5)));
        assert!(original.is_by_value());
    }

    #[test]
    fn object_clone_aliases() {
        let node = TypeBuilder::class("Node")
            .field("weight", ValueKind::Float)
            .build()
            .unwrap();

        let original = node.new_instance();
        let alias = original.clone();
        alias.as_object().unwrap().set_field("weight", 2.5).unwrap();

        assert_eq!(original, alias);
        assert_eq!(
            original.as_object().unwrap().field("weight"),
            Some(Value::Float(2.5))
        );
        assert!(!original.is_by_value());
    }

    #[test]
    fn references_compare_by_identity() {
        let a = Value::List(ListRef::new());
        let b = Value::List(ListRef::new());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(Value::from("x"), Value::from("x"));
    }
}
