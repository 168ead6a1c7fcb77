use core::fmt::Display;

use serde_core::ser::{Error, SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::info::Type;
use crate::ops::OrderedCollection;
use crate::value::Value;

/// Nesting limit of [`GraphSerializer`].
pub const MAX_DEPTH: usize = 64;

#[inline]
fn make_custom_error<E: Error>(msg: impl Display) -> E {
    E::custom(msg)
}

// -----------------------------------------------------------------------------
// GraphSerializer

/// Serializes a [`Value`] and everything reachable from it.
///
/// `Value`'s own [`Serialize`] implementation uses this with a depth of zero.
///
/// # Examples
///
/// ```
/// use vc_object::{ListRef, TypeBuilder, Value, ValueKind};
///
/// let quest = TypeBuilder::class("Quest")
///     .field("goal", ValueKind::Str)
///     .field_with("steps", ValueKind::List, || Value::List(ListRef::new()))
///     .build()
///     .unwrap();
///
/// let value = quest.new_instance();
/// value.as_object().unwrap().set_field("goal", "B").unwrap();
///
/// let json = serde_json::to_string(&value).unwrap();
/// assert_eq!(json, r#"{"goal":"B","steps":[]}"#);
/// ```
pub struct GraphSerializer<'a> {
    value: &'a Value,
    depth: usize,
}

impl<'a> GraphSerializer<'a> {
    /// Creates a serializer for `value` at nesting level `depth`.
    #[inline]
    pub fn new(value: &'a Value, depth: usize) -> Self {
        Self { value, depth }
    }

    #[inline]
    fn child<'b>(&self, value: &'b Value) -> GraphSerializer<'b> {
        GraphSerializer {
            value,
            depth: self.depth + 1,
        }
    }

    fn serialize_fields<S: Serializer>(
        &self,
        ty: &Type,
        fields: &[Value],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let keys = ty.instance_field_keys();
        let mut state = serializer.serialize_map(Some(keys.len()))?;
        for (key, slot) in keys {
            let value = fields.get(slot).ok_or_else(|| {
                make_custom_error::<S::Error>(format_args!(
                    "type `{}` has no storage for field `{key}`",
                    ty.name()
                ))
            })?;
            state.serialize_entry(&*key, &self.child(value))?;
        }
        state.end()
    }

    fn serialize_items<S: Serializer>(
        &self,
        collection: &dyn OrderedCollection,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut cursor = collection
            .cursor()
            .map_err(|err| make_custom_error::<S::Error>(err))?;
        let mut state = serializer.serialize_seq(None)?;
        while cursor.advance() {
            if let Some(value) = cursor.current() {
                state.serialize_element(&self.child(value))?;
            }
        }
        state.end()
    }
}

impl Serialize for GraphSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.depth > MAX_DEPTH {
            return Err(make_custom_error(format_args!(
                "object graph is nested deeper than {MAX_DEPTH} levels, it may contain a reference cycle"
            )));
        }

        match self.value {
            Value::Null => serializer.serialize_none(),
            Value::Bool(val) => serializer.serialize_bool(*val),
            Value::Int(val) => serializer.serialize_i64(*val),
            Value::Float(val) => serializer.serialize_f64(*val),
            Value::Char(val) => serializer.serialize_char(*val),
            Value::Str(val) => serializer.serialize_str(val),
            Value::Struct(val) => self.serialize_fields(val.ty(), val.fields(), serializer),
            Value::Object(obj) => obj
                .with_fields(|fields| self.serialize_fields(obj.ty(), fields, serializer))
                .map_err(|err| make_custom_error::<S::Error>(err))?,
            Value::Array(array) => self.serialize_items(array, serializer),
            Value::List(list) => self.serialize_items(list, serializer),
        }
    }
}

impl Serialize for Value {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        GraphSerializer::new(self, 0).serialize(serializer)
    }
}
