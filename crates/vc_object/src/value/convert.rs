use alloc::rc::Rc;
use alloc::string::String;

use crate::value::{ArrayRef, ListRef, ObjectRef, StructValue, Value};

// -----------------------------------------------------------------------------
// Into Value

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<char> for Value {
    #[inline]
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<Rc<str>> for Value {
    #[inline]
    fn from(value: Rc<str>) -> Self {
        Self::Str(value)
    }
}

impl From<StructValue> for Value {
    #[inline]
    fn from(value: StructValue) -> Self {
        Self::Struct(value)
    }
}

impl From<ObjectRef> for Value {
    #[inline]
    fn from(value: ObjectRef) -> Self {
        Self::Object(value)
    }
}

impl From<ArrayRef> for Value {
    #[inline]
    fn from(value: ArrayRef) -> Self {
        Self::Array(value)
    }
}

impl From<ListRef> for Value {
    #[inline]
    fn from(value: ListRef) -> Self {
        Self::List(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// FromValue

/// Views a [`Value`] as a concrete Rust type.
///
/// Conversions never coerce between variants: an `Int` is not a `Float`.
/// Integer targets accept any `Int` that fits in their range, and
/// [`Option<T>`] maps [`Value::Null`] to `None`.
///
/// # Examples
///
/// ```
/// use vc_object::{FromValue, Value};
///
/// assert_eq!(u8::from_value(Value::Int(200)), Some(200));
/// assert_eq!(u8::from_value(Value::Int(300)), None);
/// assert_eq!(f64::from_value(Value::Int(1)), None);
/// assert_eq!(Option::<String>::from_value(Value::Null), Some(None));
/// ```
pub trait FromValue: Sized {
    /// Returns `None` if `value` cannot be viewed as `Self`.
    fn from_value(value: Value) -> Option<Self>;
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

macro_rules! impl_from_value_int {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                #[inline]
                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Int(val) => <$ty>::try_from(val).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_from_value_variant {
    ($ty:ty, $variant:ident) => {
        impl FromValue for $ty {
            #[inline]
            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(val) => Some(val),
                    _ => None,
                }
            }
        }
    };
}

impl_from_value_variant!(bool, Bool);
impl_from_value_variant!(f64, Float);
impl_from_value_variant!(char, Char);
impl_from_value_variant!(Rc<str>, Str);
impl_from_value_variant!(StructValue, Struct);
impl_from_value_variant!(ObjectRef, Object);
impl_from_value_variant!(ArrayRef, Array);
impl_from_value_variant!(ListRef, List);

impl FromValue for f32 {
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(val) => Some(val as f32),
            _ => None,
        }
    }
}

impl FromValue for String {
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(val) => Some(String::from(&*val)),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            value => T::from_value(value).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    #[test]
    fn integer_conversions_are_range_checked() {
        assert_eq!(i32::from_value(Value::Int(-7)), Some(-7));
        assert_eq!(u32::from_value(Value::Int(-7)), None);
        assert_eq!(i8::from_value(Value::Int(i64::from(i8::MAX) + 1)), None);
        assert_eq!(usize::from_value(Value::Bool(true)), None);
    }

    #[test]
    fn strings_round_trip() {
        let value = Value::from(String::from("goal"));
        assert_eq!(String::from_value(value.clone()).as_deref(), Some("goal"));
        assert_eq!(Option::<String>::from_value(value), Some(Some(String::from("goal"))));
        assert_eq!(String::from_value(Value::Null), None);
    }

    #[test]
    fn option_into_value() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(3_u8)), Value::Int(3));
    }

    #[test]
    fn f32_widens_exactly() {
        assert_eq!(Value::from(0.1_f32), Value::Float(f64::from(0.1_f32)));
        assert_eq!(Value::from(f32::MAX).as_float(), Some(f64::from(f32::MAX)));
    }
}
