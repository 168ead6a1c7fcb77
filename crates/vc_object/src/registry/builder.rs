use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use thiserror::Error;

use crate::error::WriteError;
use crate::info::{FieldInit, Getter, MemberInfo, MemberKind, Method, Setter};
use crate::info::{Type, TypeKind, ValueKind, Visibility};
use crate::value::Value;

// -----------------------------------------------------------------------------
// Error

/// An error returned from [`TypeBuilder::build`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    #[error("value type `{0}` cannot declare a base type")]
    ValueTypeWithBase(Box<str>),

    #[error("`{derived}` cannot derive from value type `{base}`")]
    ValueTypeAsBase { derived: Box<str>, base: Box<str> },
}

// -----------------------------------------------------------------------------
// TypeBuilder

/// Declares a class or struct.
///
/// Members are kept in declaration order; that order decides which member
/// wins when several members of one type share a name.
///
/// Instance fields of a derived class are laid out after the fields of its
/// base. A derived field with the same name as a base field gets its own
/// slot and hides the base field from lookups by name.
///
/// # Examples
///
/// ```
/// use vc_object::{TypeBuilder, Value, ValueKind};
///
/// let quest = TypeBuilder::class("Quest")
///     .field("goal", ValueKind::Str)
///     .field("reward", ValueKind::Int)
///     .non_public()
///     .static_field("count", ValueKind::Int, 0)
///     .property("summary", |this| {
///         let goal = this.as_object().and_then(|obj| obj.field("goal"));
///         goal.unwrap_or(Value::Null)
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(quest.members().len(), 4);
/// assert_eq!(quest.field_slots(), 2);
/// ```
pub struct TypeBuilder {
    name: Box<str>,
    kind: TypeKind,
    base: Option<Type>,
    members: Vec<MemberInfo>,
    // Own instance fields only; slots are relative until `build`.
    field_inits: Vec<FieldInit>,
    statics: Vec<Value>,
}

impl TypeBuilder {
    fn new(name: &str, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            base: None,
            members: Vec::new(),
            field_inits: Vec::new(),
            statics: Vec::new(),
        }
    }

    /// Starts declaring a reference type.
    #[inline]
    pub fn class(name: &str) -> Self {
        Self::new(name, TypeKind::Class)
    }

    /// Starts declaring a value type.
    #[inline]
    pub fn structure(name: &str) -> Self {
        Self::new(name, TypeKind::Struct)
    }

    /// Sets the base class. Only classes may derive, and only from classes.
    #[inline]
    pub fn extends(mut self, base: &Type) -> Self {
        self.base = Some(base.clone());
        self
    }

    fn push(mut self, name: &str, is_static: bool, kind: MemberKind) -> Self {
        self.members.push(MemberInfo::new(name, is_static, kind));
        self
    }

    /// Declares an instance field holding `kind`'s default value.
    pub fn field(self, name: &str, kind: ValueKind) -> Self {
        let init = kind.clone();
        self.field_with(name, kind, move || init.default_value())
    }

    /// Declares an instance field whose initial value is produced by `init`
    /// for every new instance.
    pub fn field_with(
        mut self,
        name: &str,
        kind: ValueKind,
        init: impl Fn() -> Value + 'static,
    ) -> Self {
        let slot = self.field_inits.len();
        self.field_inits.push(Rc::new(init));
        self.push(name, false, MemberKind::Field { slot, kind })
    }

    /// Declares a static field, stored once by this type.
    pub fn static_field(mut self, name: &str, kind: ValueKind, value: impl Into<Value>) -> Self {
        let slot = self.statics.len();
        self.statics.push(value.into());
        self.push(name, true, MemberKind::Field { slot, kind })
    }

    /// Declares a read-only instance property.
    pub fn property(self, name: &str, getter: impl Fn(&Value) -> Value + 'static) -> Self {
        let getter: Getter = Rc::new(move |this: Option<&Value>| this.map_or(Value::Null, &getter));
        self.push(
            name,
            false,
            MemberKind::Property {
                getter,
                setter: None,
            },
        )
    }

    /// Declares a writable instance property.
    pub fn property_with_setter(
        self,
        name: &str,
        getter: impl Fn(&Value) -> Value + 'static,
        setter: impl Fn(&Value, Value) -> Result<(), WriteError> + 'static,
    ) -> Self {
        let getter: Getter = Rc::new(move |this: Option<&Value>| this.map_or(Value::Null, &getter));
        let setter: Setter = Rc::new(move |this: Option<&Value>, value: Value| match this {
            Some(this) => setter(this, value),
            None => Ok(()),
        });
        self.push(
            name,
            false,
            MemberKind::Property {
                getter,
                setter: Some(setter),
            },
        )
    }

    /// Declares a read-only static property.
    pub fn static_property(self, name: &str, getter: impl Fn() -> Value + 'static) -> Self {
        let getter: Getter = Rc::new(move |_: Option<&Value>| getter());
        self.push(
            name,
            true,
            MemberKind::Property {
                getter,
                setter: None,
            },
        )
    }

    /// Declares a writable static property.
    pub fn static_property_with_setter(
        self,
        name: &str,
        getter: impl Fn() -> Value + 'static,
        setter: impl Fn(Value) -> Result<(), WriteError> + 'static,
    ) -> Self {
        let getter: Getter = Rc::new(move |_: Option<&Value>| getter());
        let setter: Setter = Rc::new(move |_: Option<&Value>, value: Value| setter(value));
        self.push(
            name,
            true,
            MemberKind::Property {
                getter,
                setter: Some(setter),
            },
        )
    }

    /// Exposes a zero-argument instance method as a readable pseudo-property.
    ///
    /// Reading the member through a path *calls* `method`, with whatever side
    /// effects it has. Declaring it here is what makes it reachable by name.
    pub fn pseudo_property(self, name: &str, method: impl Fn(&Value) -> Value + 'static) -> Self {
        let call: Method = Rc::new(move |this: Option<&Value>| this.map_or(Value::Null, &method));
        self.push(name, false, MemberKind::Method { call })
    }

    /// Exposes a zero-argument static method as a readable pseudo-property.
    pub fn static_pseudo_property(self, name: &str, method: impl Fn() -> Value + 'static) -> Self {
        let call: Method = Rc::new(move |_: Option<&Value>| method());
        self.push(name, true, MemberKind::Method { call })
    }

    /// Marks the most recently declared member as non-public.
    ///
    /// Does nothing if no member has been declared yet.
    pub fn non_public(mut self) -> Self {
        if let Some(member) = self.members.last_mut() {
            member.set_visibility(Visibility::NonPublic);
        }
        self
    }

    /// Finishes the declaration.
    pub fn build(self) -> Result<Type, BuildError> {
        let Self {
            name,
            kind,
            base,
            mut members,
            field_inits,
            statics,
        } = self;

        if let Some(base) = &base {
            if kind == TypeKind::Struct {
                return Err(BuildError::ValueTypeWithBase(name));
            }
            if base.is_value_type() {
                return Err(BuildError::ValueTypeAsBase {
                    derived: name,
                    base: base.name().into(),
                });
            }
        }

        let offset = base.as_ref().map_or(0, |base| base.field_slots());
        for member in members.iter_mut().filter(|member| !member.is_static()) {
            if let MemberKind::Field { slot, .. } = member.kind_mut() {
                *slot += offset;
            }
        }

        let mut all_inits: Vec<FieldInit> = match &base {
            Some(base) => base.field_inits().to_vec(),
            None => Vec::with_capacity(field_inits.len()),
        };
        all_inits.extend(field_inits);

        Ok(Type::from_parts(name, kind, base, members, all_inits, statics))
    }
}
