use alloc::borrow::Cow;
use alloc::string::ToString;

use vc_object::ops::set_element_at;
use vc_object::{MemberInfo, MemberKind, Value};

use super::step::{resolve_on, type_name};
use crate::error::AccessErrorKind;
use crate::token::Token;

/// The final step of a [`set`](crate::set).
///
/// A set walks the path one token behind: every token but the last is read
/// like a [`get`](crate::get), and the last one is kept back until its
/// container is known. The write then targets that container directly, so
/// it lands in the storage the path actually names instead of in a value
/// that was copied out of it along the way.
///
/// Before anything is written the container is checked with
/// [`Value::is_by_value`]. Writing an instance member of a struct copy could
/// never be observed, so it fails with
/// [`ImmutableContainer`](AccessErrorKind::ImmutableContainer). Static members
/// live in their declaring type and are written regardless of the container.
///
/// # Examples
///
/// ```
/// use vc_object::{TypeBuilder, Value, ValueKind};
/// use vc_path::{AccessErrorKind, DeferredWrite, Token};
///
/// let vec2 = TypeBuilder::structure("Vec2")
///     .field("x", ValueKind::Float)
///     .build()
///     .unwrap();
/// let body = TypeBuilder::class("Body")
///     .field("mass", ValueKind::Float)
///     .field("velocity", ValueKind::Struct(vec2))
///     .build()
///     .unwrap();
///
/// let object = body.new_instance();
/// let mass = Token::MemberName("mass".into());
/// DeferredWrite::new(&object, &mass).apply(Value::Float(2.5)).unwrap();
/// assert_eq!(object.as_object().unwrap().field("mass"), Some(Value::Float(2.5)));
///
/// // `velocity` is read out as a copy; writing into it is refused.
/// let velocity = object.as_object().unwrap().field("velocity").unwrap();
/// let x = Token::MemberName("x".into());
/// let err = DeferredWrite::new(&velocity, &x).apply(Value::Float(1.0)).unwrap_err();
/// assert!(matches!(err, AccessErrorKind::ImmutableContainer { .. }));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeferredWrite<'c, 'p> {
    container: &'c Value,
    token: &'c Token<'p>,
}

impl<'c, 'p> DeferredWrite<'c, 'p> {
    /// Prepares writing the member or element `token` names in `container`.
    #[inline]
    pub const fn new(container: &'c Value, token: &'c Token<'p>) -> Self {
        Self { container, token }
    }

    /// The value the write goes into: the one reached by every token but
    /// the last.
    #[inline]
    pub const fn container(&self) -> &'c Value {
        self.container
    }

    /// The last token of the path, naming the member or element to write.
    #[inline]
    pub const fn token(&self) -> &'c Token<'p> {
        self.token
    }

    /// Performs the write.
    ///
    /// On error nothing has been written.
    pub fn apply(&self, value: Value) -> Result<(), AccessErrorKind> {
        if self.container.is_null() {
            return Err(AccessErrorKind::NullIntermediate);
        }
        match self.token {
            Token::MemberName(name) => self.write_member(name, value),
            &Token::ElementIndex(index) => self.write_element(index, value),
        }
    }

    fn write_member(&self, name: &str, value: Value) -> Result<(), AccessErrorKind> {
        let resolved = resolve_on(self.container, name)?;
        let member = resolved.member();

        match member.kind() {
            MemberKind::Field { slot, kind } => {
                self.check_observable(member)?;
                if !kind.accepts(&value) {
                    return Err(AccessErrorKind::TypeMismatch {
                        expected: Cow::Owned(kind.to_string()),
                        found: value.kind_name(),
                    });
                }
                if member.is_static() {
                    Ok(resolved.owner().write_static(*slot, value)?)
                } else {
                    self.write_instance_slot(*slot, value)
                }
            }
            MemberKind::Property {
                setter: Some(setter),
                ..
            } => {
                self.check_observable(member)?;
                let receiver = (!member.is_static()).then_some(self.container);
                setter(receiver, value).map_err(AccessErrorKind::SetterFailed)
            }
            MemberKind::Property { setter: None, .. } | MemberKind::Method { .. } => {
                Err(AccessErrorKind::NotWritable {
                    member: member.kind().describe(),
                    name: name.into(),
                })
            }
        }
    }

    fn write_instance_slot(&self, slot: usize, value: Value) -> Result<(), AccessErrorKind> {
        match self.container {
            Value::Object(obj) => Ok(obj.write_slot(slot, value)?),
            other => Err(self.immutable(other)),
        }
    }

    // Arrays and lists are shared handles, so element writes are always observable.
    fn write_element(&self, index: usize, value: Value) -> Result<(), AccessErrorKind> {
        let collection = self
            .container
            .as_collection()
            .ok_or(AccessErrorKind::NotCollection {
                found: self.container.kind_name(),
            })?;
        Ok(set_element_at(collection, index, value)?)
    }

    fn check_observable(&self, member: &MemberInfo) -> Result<(), AccessErrorKind> {
        if member.is_static() || !self.container.is_by_value() {
            Ok(())
        } else {
            Err(self.immutable(self.container))
        }
    }

    fn immutable(&self, container: &Value) -> AccessErrorKind {
        AccessErrorKind::ImmutableContainer {
            ty: type_name(container).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;
    use alloc::string::ToString;

    use vc_object::{ListRef, TypeBuilder, Value, ValueKind, WriteError};

    use super::DeferredWrite;
    use crate::error::AccessErrorKind;
    use crate::token::Token;

    fn name(name: &'static str) -> Token<'static> {
        Token::MemberName(Cow::Borrowed(name))
    }

    #[test]
    fn exposes_its_target() {
        let list = Value::List(ListRef::new());
        let token = Token::ElementIndex(2);
        let write = DeferredWrite::new(&list, &token);

        assert!(write.container().as_list().is_some());
        assert_eq!(write.token(), &Token::ElementIndex(2));
        assert_eq!(write.token().to_string(), "Array.data[2]");
    }

    #[test]
    fn writes_object_field() {
        let ty = TypeBuilder::class("Door")
            .field("open", ValueKind::Bool)
            .build()
            .unwrap();
        let door = ty.new_instance();

        DeferredWrite::new(&door, &name("open"))
            .apply(Value::Bool(true))
            .unwrap();
        assert_eq!(door.as_object().unwrap().field("open"), Some(Value::Bool(true)));
    }

    #[test]
    fn struct_container_is_rejected_without_mutation() {
        let ty = TypeBuilder::structure("Color")
            .field("r", ValueKind::Int)
            .build()
            .unwrap();
        let color = ty.new_instance();

        let err = DeferredWrite::new(&color, &name("r"))
            .apply(Value::Int(255))
            .unwrap_err();
        assert_eq!(err, AccessErrorKind::ImmutableContainer { ty: "Color".into() });
        assert_eq!(color.as_struct().unwrap().field("r"), Some(&Value::Int(0)));
    }

    #[test]
    fn static_field_ignores_by_value_container() {
        let ty = TypeBuilder::structure("Limits")
            .static_field("max", ValueKind::Int, 10)
            .build()
            .unwrap();
        let limits = ty.new_instance();

        DeferredWrite::new(&limits, &name("max"))
            .apply(Value::Int(20))
            .unwrap();
        assert_eq!(ty.read_static(0), Ok(Value::Int(20)));
    }

    #[test]
    fn read_only_property_and_method_are_not_writable() {
        let ty = TypeBuilder::class("Timer")
            .property("elapsed", |_| Value::Float(0.0))
            .pseudo_property("reset", |_| Value::Null)
            .build()
            .unwrap();
        let timer = ty.new_instance();

        let err = DeferredWrite::new(&timer, &name("elapsed"))
            .apply(Value::Float(1.0))
            .unwrap_err();
        assert_eq!(
            err,
            AccessErrorKind::NotWritable {
                member: "property",
                name: "elapsed".into()
            }
        );

        let err = DeferredWrite::new(&timer, &name("reset"))
            .apply(Value::Null)
            .unwrap_err();
        assert!(matches!(err, AccessErrorKind::NotWritable { member: "method", .. }));
    }

    #[test]
    fn property_setter_errors_are_reported() {
        let ty = TypeBuilder::class("Gauge")
            .property_with_setter(
                "level",
                |_| Value::Int(0),
                |_, value| match value {
                    Value::Int(_) => Ok(()),
                    other => Err(WriteError::KindMismatch {
                        expected: ValueKind::Int,
                        found: other.kind_name(),
                    }),
                },
            )
            .build()
            .unwrap();
        let gauge = ty.new_instance();

        let token = name("level");
        let write = DeferredWrite::new(&gauge, &token);
        assert!(write.apply(Value::Int(3)).is_ok());
        assert!(matches!(
            write.apply(Value::Bool(false)),
            Err(AccessErrorKind::SetterFailed(_))
        ));
    }

    #[test]
    fn field_kind_is_checked() {
        let ty = TypeBuilder::class("Label")
            .field("text", ValueKind::Str)
            .build()
            .unwrap();
        let label = ty.new_instance();

        let err = DeferredWrite::new(&label, &name("text"))
            .apply(Value::Int(1))
            .unwrap_err();
        assert!(matches!(err, AccessErrorKind::TypeMismatch { found: "Int", .. }));

        DeferredWrite::new(&label, &name("text"))
            .apply(Value::Null)
            .unwrap();
    }

    #[test]
    fn replaces_list_element() {
        let list: ListRef = [Value::Int(1), Value::Int(2), Value::Int(3)]
            .into_iter()
            .collect();
        let container = Value::List(list.clone());

        DeferredWrite::new(&container, &Token::ElementIndex(1))
            .apply(Value::Int(20))
            .unwrap();
        assert_eq!(list.to_vec(), [Value::Int(1), Value::Int(20), Value::Int(3)]);

        let err = DeferredWrite::new(&container, &Token::ElementIndex(3))
            .apply(Value::Int(0))
            .unwrap_err();
        assert_eq!(err, AccessErrorKind::IndexOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn null_and_primitive_containers() {
        let err = DeferredWrite::new(&Value::Null, &name("x"))
            .apply(Value::Int(0))
            .unwrap_err();
        assert_eq!(err, AccessErrorKind::NullIntermediate);

        let err = DeferredWrite::new(&Value::Int(4), &Token::ElementIndex(0))
            .apply(Value::Int(0))
            .unwrap_err();
        assert_eq!(err, AccessErrorKind::NotCollection { found: "Int" });

        let err = DeferredWrite::new(&Value::Int(4), &name("x"))
            .apply(Value::Int(0))
            .unwrap_err();
        assert!(matches!(err, AccessErrorKind::MemberNotFound { .. }));
    }
}
