use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use crate::error::{StorageError, WriteError};
use crate::info::{Type, TypeKind, ValueKind};
use crate::value::Value;

fn check_kind(kind: &ValueKind, value: &Value) -> Result<(), WriteError> {
    if kind.accepts(value) {
        Ok(())
    } else {
        Err(WriteError::KindMismatch {
            expected: kind.clone(),
            found: value.kind_name(),
        })
    }
}

fn missing_field(ty: &Type, name: &str) -> WriteError {
    WriteError::MissingField {
        ty: ty.name().into(),
        name: name.into(),
    }
}

// -----------------------------------------------------------------------------
// ObjectRef

struct ObjectData {
    ty: Type,
    fields: RefCell<Box<[Value]>>,
}

/// A shared handle to an instance of a class.
///
/// Cloning the handle does not copy the instance.
///
/// # Examples
///
/// ```
/// use vc_object::{ObjectRef, TypeBuilder, Value, ValueKind};
///
/// let quest = TypeBuilder::class("Quest")
///     .field("goal", ValueKind::Str)
///     .build()
///     .unwrap();
///
/// let obj = ObjectRef::new(&quest);
/// obj.set_field("goal", "find the key").unwrap();
///
/// let alias = obj.clone();
/// assert_eq!(alias.field("goal"), Some(Value::from("find the key")));
/// assert!(obj.set_field("goal", 3).is_err());
/// ```
#[derive(Clone)]
pub struct ObjectRef(Rc<ObjectData>);

impl ObjectRef {
    /// Creates an instance of `ty` with every field set to its initial value.
    ///
    /// # Panics
    ///
    /// Panics if `ty` is a value type; use [`StructValue::new`] or
    /// [`Type::new_instance`] instead.
    pub fn new(ty: &Type) -> Self {
        assert!(
            ty.kind() == TypeKind::Class,
            "`{}` is a value type and cannot be instantiated as an object",
            ty.name()
        );
        Self(Rc::new(ObjectData {
            ty: ty.clone(),
            fields: RefCell::new(ty.initial_fields()),
        }))
    }

    /// Returns the runtime type of the instance.
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.0.ty
    }

    /// Returns `true` if both handles refer to the same instance.
    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Reads the instance field stored at `slot`.
    pub fn read_slot(&self, slot: usize) -> Result<Value, StorageError> {
        let fields = self.0.fields.try_borrow().map_err(|_| StorageError::Busy)?;
        match fields.get(slot) {
            Some(value) => Ok(value.clone()),
            None => Err(StorageError::SlotOutOfBounds {
                slot,
                len: fields.len(),
            }),
        }
    }

    /// Overwrites the instance field stored at `slot`.
    ///
    /// The declared kind of the field is not checked.
    pub fn write_slot(&self, slot: usize, value: Value) -> Result<(), StorageError> {
        let mut fields = self
            .0
            .fields
            .try_borrow_mut()
            .map_err(|_| StorageError::Busy)?;
        let len = fields.len();
        match fields.get_mut(slot) {
            Some(it) => {
                *it = value;
                Ok(())
            }
            None => Err(StorageError::SlotOutOfBounds { slot, len }),
        }
    }

    /// Runs `f` over the instance storage, base class fields first.
    pub fn with_fields<R>(&self, f: impl FnOnce(&[Value]) -> R) -> Result<R, StorageError> {
        let fields = self.0.fields.try_borrow().map_err(|_| StorageError::Busy)?;
        Ok(f(&fields))
    }

    /// Reads the first instance field named `name`, see [`TypeInfo::instance_field`].
    ///
    /// Returns `None` if there is no such field or the storage is busy.
    ///
    /// [`TypeInfo::instance_field`]: crate::TypeInfo::instance_field
    pub fn field(&self, name: &str) -> Option<Value> {
        let (slot, _) = self.ty().instance_field(name)?;
        self.read_slot(slot).ok()
    }

    /// Writes the first instance field named `name`, checking its declared kind.
    pub fn set_field(&self, name: &str, value: impl Into<Value>) -> Result<(), WriteError> {
        let value = value.into();
        let (slot, kind) = self
            .ty()
            .instance_field(name)
            .ok_or_else(|| missing_field(self.ty(), name))?;
        check_kind(kind, &value)?;
        Ok(self.write_slot(slot, value)?)
    }
}

impl fmt::Debug for ObjectRef {
    // Objects may form cycles, so only the identity is printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({}@{:p})", self.ty().name(), Rc::as_ptr(&self.0))
    }
}

// -----------------------------------------------------------------------------
// StructValue

/// An instance of a value type.
///
/// Cloning copies every field; reference fields inside the copy still point
/// to the same objects.
///
/// # Examples
///
/// ```
/// use vc_object::{StructValue, TypeBuilder, Value, ValueKind};
///
/// let point = TypeBuilder::structure("Point")
///     .field("x", ValueKind::Int)
///     .field("y", ValueKind::Int)
///     .build()
///     .unwrap();
///
/// let mut a = StructValue::new(&point);
/// a.set_field("x", 3).unwrap();
///
/// let b = a.clone();
/// a.set_field("x", 4).unwrap();
///
/// assert_eq!(b.field("x"), Some(&Value::Int(3)));
/// ```
#[derive(Clone, PartialEq)]
pub struct StructValue {
    ty: Type,
    fields: Box<[Value]>,
}

impl StructValue {
    /// Creates an instance of `ty` with every field set to its initial value.
    ///
    /// # Panics
    ///
    /// Panics if `ty` is a class; use [`ObjectRef::new`] or
    /// [`Type::new_instance`] instead.
    pub fn new(ty: &Type) -> Self {
        assert!(
            ty.kind() == TypeKind::Struct,
            "`{}` is a class and cannot be instantiated as a struct",
            ty.name()
        );
        Self {
            ty: ty.clone(),
            fields: ty.initial_fields(),
        }
    }

    /// Returns the runtime type of the value.
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the field storage.
    #[inline]
    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    /// Reads the field stored at `slot`.
    #[inline]
    pub fn slot(&self, slot: usize) -> Option<&Value> {
        self.fields.get(slot)
    }

    /// Returns the field named `name`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        let (slot, _) = self.ty.instance_field(name)?;
        self.fields.get(slot)
    }

    /// Writes the field named `name`, checking its declared kind.
    ///
    /// This mutates the value itself, which the caller owns; it is unrelated
    /// to writing through a path.
    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) -> Result<(), WriteError> {
        let value = value.into();
        let (slot, kind) = self
            .ty
            .instance_field(name)
            .ok_or_else(|| missing_field(&self.ty, name))?;
        check_kind(kind, &value)?;
        let len = self.fields.len();
        match self.fields.get_mut(slot) {
            Some(it) => {
                *it = value;
                Ok(())
            }
            None => Err(StorageError::SlotOutOfBounds { slot, len }.into()),
        }
    }
}

impl fmt::Debug for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.ty.name());
        for (name, slot) in self.ty.instance_fields() {
            if let Some(value) = self.fields.get(slot) {
                out.field(name, value);
            }
        }
        out.finish()
    }
}
