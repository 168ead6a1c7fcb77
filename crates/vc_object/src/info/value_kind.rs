use core::fmt;

use crate::info::Type;
use crate::value::Value;

// -----------------------------------------------------------------------------
// ValueKind

/// The declared kind of a field.
///
/// Field writes are checked against it, and it provides the value a field
/// holds when an instance is created without an explicit initializer.
///
/// `Null` is accepted by every kind whose values are references
/// (`Str`, `Object`, `AnyObject`, `Array`, `List`) and by `Any`.
///
/// # Examples
///
/// ```
/// use vc_object::{Value, ValueKind};
///
/// assert!(ValueKind::Int.accepts(&Value::Int(3)));
/// assert!(!ValueKind::Int.accepts(&Value::Float(3.0)));
/// assert!(ValueKind::List.accepts(&Value::Null));
/// assert_eq!(ValueKind::Bool.default_value(), Value::Bool(false));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    Any,
    Bool,
    Int,
    Float,
    Char,
    Str,
    /// An instance of exactly this value type.
    Struct(Type),
    /// An instance of this class or of one of its subclasses.
    Object(Type),
    /// An instance of any class.
    AnyObject,
    Array,
    List,
}

impl ValueKind {
    /// Returns `true` if `value` may be stored in a field of this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::Bool, Value::Bool(_)) => true,
            (Self::Int, Value::Int(_)) => true,
            (Self::Float, Value::Float(_)) => true,
            (Self::Char, Value::Char(_)) => true,
            (Self::Struct(ty), Value::Struct(val)) => val.ty().ptr_eq(ty),
            (Self::Object(ty), Value::Object(obj)) => obj.ty().is_subtype_of(ty),
            (Self::AnyObject, Value::Object(_)) => true,
            (Self::Str, Value::Str(_)) => true,
            (Self::Array, Value::Array(_)) => true,
            (Self::List, Value::List(_)) => true,
            (Self::Str | Self::Object(_) | Self::AnyObject | Self::Array | Self::List, Value::Null) => {
                true
            }
            _ => false,
        }
    }

    /// Returns the value held by a field of this kind before anything is written.
    ///
    /// Value types are default-constructed; references start as [`Value::Null`].
    pub fn default_value(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Float => Value::Float(0.0),
            Self::Char => Value::Char('\0'),
            Self::Struct(ty) => ty.new_instance(),
            Self::Any | Self::Str | Self::Object(_) | Self::AnyObject | Self::Array | Self::List => {
                Value::Null
            }
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.pad("Any"),
            Self::Bool => f.pad("Bool"),
            Self::Int => f.pad("Int"),
            Self::Float => f.pad("Float"),
            Self::Char => f.pad("Char"),
            Self::Str => f.pad("Str"),
            Self::Struct(ty) => write!(f, "Struct({})", ty.name()),
            Self::Object(ty) => write!(f, "Object({})", ty.name()),
            Self::AnyObject => f.pad("Object"),
            Self::Array => f.pad("Array"),
            Self::List => f.pad("List"),
        }
    }
}
