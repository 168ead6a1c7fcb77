use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::ops::Deref;

use crate::error::StorageError;
use crate::hash::HashMap;
use crate::info::{FieldInit, MemberInfo, MemberKind, ValueKind};
use crate::value::{ObjectRef, StructValue, Value};

// -----------------------------------------------------------------------------
// TypeKind

/// Whether instances of a type are shared or copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A reference type: instances are [`ObjectRef`]s and every read of an
    /// instance yields a handle to the same storage.
    Class,
    /// A value type: instances are [`StructValue`]s and every read of an
    /// instance yields an independent copy.
    Struct,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => f.pad("class"),
            Self::Struct => f.pad("struct"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Runtime description of a class or struct.
///
/// Obtained through a [`Type`] handle, which dereferences to this.
pub struct TypeInfo {
    name: Box<str>,
    kind: TypeKind,
    base: Option<Type>,
    // Declaration order.
    members: Box<[MemberInfo]>,
    // Name -> index of the first declared member with that name.
    lookup: HashMap<Box<str>, usize>,
    // One initializer per instance slot, base slots first.
    field_inits: Box<[FieldInit]>,
    statics: RefCell<Box<[Value]>>,
}

impl TypeInfo {
    /// Returns the type name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the [`TypeKind`].
    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns `true` for struct types, whose instances are copied on read.
    #[inline]
    pub fn is_value_type(&self) -> bool {
        self.kind == TypeKind::Struct
    }

    /// Returns the declared base class.
    ///
    /// `None` means the type derives directly from the universal root type,
    /// which declares no members.
    #[inline]
    pub fn base(&self) -> Option<&Type> {
        self.base.as_ref()
    }

    /// Returns the members declared by this type, in declaration order.
    ///
    /// Inherited members are not included; see [`TypeInfo::ancestors`].
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Returns the first member declared by this type (not its bases) with
    /// the given name, whatever its kind.
    pub fn declared_member(&self, name: &str) -> Option<&MemberInfo> {
        let index = *self.lookup.get(name)?;
        self.members.get(index)
    }

    /// Returns an iterator over this type followed by its base classes,
    /// most derived first.
    #[inline]
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Returns the number of instance field slots, inherited ones included.
    #[inline]
    pub fn field_slots(&self) -> usize {
        self.field_inits.len()
    }

    /// Returns the slot and declared kind of the first instance field named
    /// `name`, searching this type and then its bases.
    ///
    /// Properties and methods are skipped.
    pub fn instance_field(&self, name: &str) -> Option<(usize, &ValueKind)> {
        self.ancestors().find_map(|ty| {
            ty.members.iter().find_map(|member| match member.kind() {
                MemberKind::Field { slot, kind } if !member.is_static() && member.name() == name => {
                    Some((*slot, kind))
                }
                _ => None,
            })
        })
    }

    /// Returns `(name, slot)` for every instance field, base classes first.
    ///
    /// A field shadowed by a derived type appears once per declaring type.
    pub fn instance_fields(&self) -> Vec<(&str, usize)> {
        let mut chain: Vec<&TypeInfo> = self.ancestors().collect();
        chain.reverse();

        chain
            .into_iter()
            .flat_map(|ty| ty.members.iter())
            .filter_map(|member| match member.kind() {
                MemberKind::Field { slot, .. } if !member.is_static() => {
                    Some((member.name(), *slot))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns `(key, slot)` for every instance field, base classes first.
    ///
    /// The key is the field name for fields visible through this type, and
    /// `Owner::name` for a base field hidden by a field of the same name.
    pub fn instance_field_keys(&self) -> Vec<(Cow<'_, str>, usize)> {
        let mut chain: Vec<&TypeInfo> = self.ancestors().collect();
        chain.reverse();

        chain
            .into_iter()
            .flat_map(|owner| owner.members.iter().map(move |member| (owner, member)))
            .filter_map(|(owner, member)| match member.kind() {
                MemberKind::Field { slot, .. } if !member.is_static() => {
                    let visible = self
                        .instance_field(member.name())
                        .is_some_and(|(found, _)| found == *slot);
                    let key = if visible {
                        Cow::Borrowed(member.name())
                    } else {
                        Cow::Owned(format!("{}::{}", owner.name(), member.name()))
                    };
                    Some((key, *slot))
                }
                _ => None,
            })
            .collect()
    }

    /// Reads a static field declared by this type.
    pub fn read_static(&self, slot: usize) -> Result<Value, StorageError> {
        let statics = self.statics.try_borrow().map_err(|_| StorageError::Busy)?;
        match statics.get(slot) {
            Some(value) => Ok(value.clone()),
            None => Err(StorageError::SlotOutOfBounds {
                slot,
                len: statics.len(),
            }),
        }
    }

    /// Writes a static field declared by this type.
    pub fn write_static(&self, slot: usize, value: Value) -> Result<(), StorageError> {
        let mut statics = self
            .statics
            .try_borrow_mut()
            .map_err(|_| StorageError::Busy)?;
        let len = statics.len();
        match statics.get_mut(slot) {
            Some(it) => {
                *it = value;
                Ok(())
            }
            None => Err(StorageError::SlotOutOfBounds { slot, len }),
        }
    }

    #[inline]
    pub(crate) fn field_inits(&self) -> &[FieldInit] {
        &self.field_inits
    }

    // Initial value of every instance slot.
    pub(crate) fn initial_fields(&self) -> Box<[Value]> {
        self.field_inits.iter().map(|init| init()).collect()
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("base", &self.base.as_ref().map(|base| base.name()))
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Ancestors

/// Iterator over a type and its base classes, see [`TypeInfo::ancestors`].
#[derive(Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a TypeInfo>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base.as_deref();
        Some(current)
    }
}

// -----------------------------------------------------------------------------
// Type

/// A shared handle to a [`TypeInfo`].
///
/// Two handles are equal when they refer to the same type.
///
/// # Examples
///
/// ```
/// use vc_object::{TypeBuilder, ValueKind};
///
/// let entity = TypeBuilder::class("Entity")
///     .field("id", ValueKind::Int)
///     .build()
///     .unwrap();
/// let player = TypeBuilder::class("Player")
///     .extends(&entity)
///     .field("name", ValueKind::Str)
///     .build()
///     .unwrap();
///
/// assert!(player.is_subtype_of(&entity));
/// assert!(!entity.is_subtype_of(&player));
/// assert_eq!(player.field_slots(), 2);
/// ```
#[derive(Clone)]
pub struct Type(Rc<TypeInfo>);

impl Type {
    pub(crate) fn from_parts(
        name: Box<str>,
        kind: TypeKind,
        base: Option<Type>,
        members: Vec<MemberInfo>,
        field_inits: Vec<FieldInit>,
        statics: Vec<Value>,
    ) -> Self {
        let mut lookup: HashMap<Box<str>, usize> = HashMap::default();
        for (index, member) in members.iter().enumerate() {
            lookup.entry(member.name().into()).or_insert(index);
        }

        Self(Rc::new(TypeInfo {
            name,
            kind,
            base,
            members: members.into_boxed_slice(),
            lookup,
            field_inits: field_inits.into_boxed_slice(),
            statics: RefCell::new(statics.into_boxed_slice()),
        }))
    }

    /// Returns `true` if both handles refer to the same type.
    #[inline]
    pub fn ptr_eq(&self, other: &Type) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Returns `true` if `self` is `other` or derives from it.
    pub fn is_subtype_of(&self, other: &Type) -> bool {
        self.ancestors()
            .any(|ty| core::ptr::eq(ty, Rc::as_ptr(&other.0)))
    }

    /// Creates an instance with every field set to its initial value.
    ///
    /// Classes produce [`Value::Object`], structs produce [`Value::Struct`].
    pub fn new_instance(&self) -> Value {
        match self.kind {
            TypeKind::Class => Value::Object(ObjectRef::new(self)),
            TypeKind::Struct => Value::Struct(StructValue::new(self)),
        }
    }
}

impl Deref for Type {
    type Target = TypeInfo;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self.name)
    }
}

impl fmt::Display for Type {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name)
    }
}
