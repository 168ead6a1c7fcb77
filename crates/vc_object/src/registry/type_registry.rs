use alloc::boxed::Box;

use crate::hash::HashMap;
use crate::info::Type;
use crate::value::Value;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of types, keyed by type name.
///
/// # Example
///
/// ```
/// use vc_object::{TypeBuilder, TypeRegistry, ValueKind};
///
/// let mut registry = TypeRegistry::new();
/// let quest = TypeBuilder::class("Quest")
///     .field("goal", ValueKind::Str)
///     .build()
///     .unwrap();
///
/// assert!(registry.register(quest.clone()));
/// assert!(!registry.register(quest));
///
/// let instance = registry.instantiate("Quest").unwrap();
/// assert_eq!(instance.ty().map(|ty| ty.name()), Some("Quest"));
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<Box<str>, Type>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type under its name.
    ///
    /// - If the name is already registered, nothing changes and `false` is returned.
    /// - Otherwise the type is inserted and `true` is returned.
    pub fn register(&mut self, ty: Type) -> bool {
        if self.types.contains_key(ty.name()) {
            return false;
        }
        self.types.insert(ty.name().into(), ty);
        true
    }

    /// Returns the type registered under `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    /// Returns `true` if a type is registered under `name`.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Creates an instance of the type registered under `name`.
    pub fn instantiate(&self, name: &str) -> Option<Value> {
        self.get(name).map(Type::new_instance)
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns an iterator over the registered types, in no particular order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeBuilder;

    #[test]
    fn lookup_by_name() {
        let mut registry = TypeRegistry::new();
        registry.register(TypeBuilder::class("A").build().unwrap());
        registry.register(TypeBuilder::structure("B").build().unwrap());

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("A"));
        assert!(registry.get("C").is_none());
        assert!(registry.instantiate("B").unwrap().is_by_value());
        assert!(!registry.instantiate("A").unwrap().is_by_value());
    }
}
