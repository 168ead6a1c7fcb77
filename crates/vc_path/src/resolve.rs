//! Member lookup along the base-type chain.

use vc_object::{MemberInfo, TypeInfo};

/// A member found by [`resolve_member`], together with the type declaring it.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMember<'t> {
    owner: &'t TypeInfo,
    member: &'t MemberInfo,
}

impl<'t> ResolvedMember<'t> {
    /// The type that declares the member.
    ///
    /// Static fields live in this type's storage.
    #[inline]
    pub fn owner(&self) -> &'t TypeInfo {
        self.owner
    }

    #[inline]
    pub fn member(&self) -> &'t MemberInfo {
        self.member
    }
}

/// Finds the member called `name` on `ty` or the nearest base type declaring one.
///
/// Fields, properties and pseudo-properties are searched together, public or
/// not, instance or static. Within a type the first declared member with the
/// name wins, and a derived type's member hides any base member of the same
/// name. Returns `None` once the chain is exhausted.
///
/// # Examples
///
/// ```
/// use vc_object::{TypeBuilder, ValueKind};
/// use vc_path::resolve_member;
///
/// let base = TypeBuilder::class("Base")
///     .field("hp", ValueKind::Int)
///     .field("name", ValueKind::Str)
///     .build()
///     .unwrap();
/// let derived = TypeBuilder::class("Derived")
///     .extends(&base)
///     .field("hp", ValueKind::Float)
///     .build()
///     .unwrap();
///
/// let hp = resolve_member(&derived, "hp").unwrap();
/// assert_eq!(hp.owner().name(), "Derived");
///
/// let name = resolve_member(&derived, "name").unwrap();
/// assert_eq!(name.owner().name(), "Base");
///
/// assert!(resolve_member(&derived, "missing").is_none());
/// ```
pub fn resolve_member<'t>(ty: &'t TypeInfo, name: &str) -> Option<ResolvedMember<'t>> {
    ty.ancestors().find_map(|owner| {
        owner
            .declared_member(name)
            .map(|member| ResolvedMember { owner, member })
    })
}

#[cfg(test)]
mod tests {
    use vc_object::{MemberKind, TypeBuilder, Value, ValueKind, Visibility};

    use super::resolve_member;

    #[test]
    fn walks_three_levels() {
        let a = TypeBuilder::class("A")
            .field("deep", ValueKind::Int)
            .build()
            .unwrap();
        let b = TypeBuilder::class("B").extends(&a).build().unwrap();
        let c = TypeBuilder::class("C").extends(&b).build().unwrap();

        let found = resolve_member(&c, "deep").unwrap();
        assert_eq!(found.owner().name(), "A");
        assert!(found.member().is_field());
    }

    #[test]
    fn derived_property_hides_base_field() {
        let base = TypeBuilder::class("Base")
            .field("value", ValueKind::Int)
            .build()
            .unwrap();
        let derived = TypeBuilder::class("Derived")
            .extends(&base)
            .property("value", |_| Value::Int(7))
            .build()
            .unwrap();

        let found = resolve_member(&derived, "value").unwrap();
        assert_eq!(found.owner().name(), "Derived");
        assert!(matches!(found.member().kind(), MemberKind::Property { .. }));
    }

    #[test]
    fn private_and_static_members_resolve() {
        let ty = TypeBuilder::class("Config")
            .field("secret", ValueKind::Str)
            .non_public()
            .static_field("count", ValueKind::Int, 3)
            .build()
            .unwrap();

        let secret = resolve_member(&ty, "secret").unwrap();
        assert_eq!(secret.member().visibility(), Visibility::NonPublic);

        let count = resolve_member(&ty, "count").unwrap();
        assert!(count.member().is_static());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let ty = TypeBuilder::class("T")
            .field("speed", ValueKind::Float)
            .build()
            .unwrap();
        assert!(resolve_member(&ty, "Speed").is_none());
        assert!(resolve_member(&ty, "").is_none());
    }
}
