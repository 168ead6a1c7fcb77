use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;

use crate::error::WriteError;
use crate::info::ValueKind;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Closures

/// Reads a property. The receiver is `None` for static properties.
pub type Getter = Rc<dyn Fn(Option<&Value>) -> Value>;

/// Writes a property. The receiver is `None` for static properties.
pub type Setter = Rc<dyn Fn(Option<&Value>, Value) -> Result<(), WriteError>>;

/// A zero-argument method exposed as a readable pseudo-property.
/// The receiver is `None` for static methods.
pub type Method = Rc<dyn Fn(Option<&Value>) -> Value>;

/// Produces the initial value of an instance field.
pub(crate) type FieldInit = Rc<dyn Fn() -> Value>;

// -----------------------------------------------------------------------------
// Visibility

/// Declared visibility of a member.
///
/// Lookup by name ignores it: non-public members resolve like public ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    NonPublic,
}

// -----------------------------------------------------------------------------
// MemberKind

/// What a [`MemberInfo`] gives access to.
#[derive(Clone)]
pub enum MemberKind {
    /// A stored field.
    ///
    /// `slot` indexes the instance storage for instance fields, and the
    /// declaring type's static storage for static fields.
    Field { slot: usize, kind: ValueKind },
    /// A computed property; read-only when `setter` is `None`.
    Property {
        getter: Getter,
        setter: Option<Setter>,
    },
    /// A zero-argument method, readable as a pseudo-property.
    Method { call: Method },
}

impl MemberKind {
    /// Returns a short name of the kind: `"field"`, `"property"` or `"method"`.
    #[inline]
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Field { .. } => "field",
            Self::Property { .. } => "property",
            Self::Method { .. } => "method",
        }
    }
}

impl fmt::Debug for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { slot, kind } => f
                .debug_struct("Field")
                .field("slot", slot)
                .field("kind", kind)
                .finish(),
            Self::Property { setter, .. } => f
                .debug_struct("Property")
                .field("writable", &setter.is_some())
                .finish_non_exhaustive(),
            Self::Method { .. } => f.debug_struct("Method").finish_non_exhaustive(),
        }
    }
}

// -----------------------------------------------------------------------------
// MemberInfo

/// A field, property or zero-argument method declared by a type.
///
/// # Examples
///
/// ```
/// use vc_object::{TypeBuilder, ValueKind, Visibility};
///
/// let ty = TypeBuilder::class("Counter")
///     .field("count", ValueKind::Int)
///     .non_public()
///     .build()
///     .unwrap();
///
/// let member = ty.declared_member("count").unwrap();
/// assert_eq!(member.name(), "count");
/// assert_eq!(member.visibility(), Visibility::NonPublic);
/// assert!(member.is_field());
/// assert!(!member.is_static());
/// ```
#[derive(Clone, Debug)]
pub struct MemberInfo {
    name: Box<str>,
    visibility: Visibility,
    is_static: bool,
    kind: MemberKind,
}

impl MemberInfo {
    #[inline]
    pub(crate) fn new(name: &str, is_static: bool, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static,
            kind,
        }
    }

    #[inline]
    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    #[inline]
    pub(crate) fn kind_mut(&mut self) -> &mut MemberKind {
        &mut self.kind
    }

    /// Returns the member name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared visibility.
    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns `true` for static members, which are accessed without a receiver.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Returns what this member gives access to.
    #[inline]
    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    #[inline]
    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field { .. })
    }

    #[inline]
    pub fn is_property(&self) -> bool {
        matches!(self.kind, MemberKind::Property { .. })
    }

    #[inline]
    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }

    /// Returns `true` if the member can be assigned: fields and properties
    /// with a setter.
    pub fn is_writable(&self) -> bool {
        match &self.kind {
            MemberKind::Field { .. } => true,
            MemberKind::Property { setter, .. } => setter.is_some(),
            MemberKind::Method { .. } => false,
        }
    }
}
