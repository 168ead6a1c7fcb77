//! Path-based reads and writes over a [`Value`] graph.
//!
//! A get walks the path from the root, replacing the current container with
//! the value each token selects. A set walks the same way but one token
//! behind, then hands the last token and its container to [`DeferredWrite`].

// -----------------------------------------------------------------------------
// Modules

mod deferred;
mod step;

// -----------------------------------------------------------------------------
// Exports

pub use deferred::DeferredWrite;

// -----------------------------------------------------------------------------
// PathAccess

use alloc::borrow::Cow;

use vc_object::{FromValue, Value};

use crate::error::{AccessError, AccessErrorKind};
use crate::options::AccessOptions;
use crate::token::{OffsetToken, PathTokens};

use step::read_step;

/// Reads and writes values addressed by paths, with fixed [`AccessOptions`].
///
/// The free functions [`get`], [`get_value`], [`try_get`] and [`set`] use
/// the default options.
///
/// # Panics
///
/// Every method panics if `root` is [`Value::Null`].
///
/// # Examples
///
/// ```
/// use vc_object::{TypeBuilder, Value, ValueKind};
/// use vc_path::{AccessErrorKind, AccessOptions, PathAccess};
///
/// let counter = TypeBuilder::class("Counter")
///     .field("count", ValueKind::Int)
///     .pseudo_property("bump", |this| {
///         let obj = this.as_object().unwrap();
///         let next = obj.field("count").and_then(|v| v.as_int()).unwrap_or(0) + 1;
///         obj.set_field("count", next).unwrap();
///         Value::Int(next)
///     })
///     .build()
///     .unwrap();
/// let root = counter.new_instance();
///
/// let access = PathAccess::new();
/// assert_eq!(access.get::<i64>(&root, "bump"), Ok(1));
///
/// let pure = PathAccess::with_options(AccessOptions::side_effect_free());
/// let err = pure.get::<i64>(&root, "bump").unwrap_err();
/// assert!(matches!(err.kind(), AccessErrorKind::MethodCallDenied { .. }));
/// assert_eq!(pure.get::<i64>(&root, "count"), Ok(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PathAccess {
    options: AccessOptions,
}

impl PathAccess {
    /// Creates an accessor with default options.
    #[inline]
    pub const fn new() -> Self {
        Self {
            options: AccessOptions::new(),
        }
    }

    #[inline]
    pub const fn with_options(options: AccessOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub const fn options(&self) -> AccessOptions {
        self.options
    }

    /// Returns the value at `path`.
    ///
    /// An empty path returns `root` itself.
    pub fn get_value<'p>(&self, root: &Value, path: &'p str) -> Result<Value, AccessError<'p>> {
        assert_root(root);
        let result = self.walk(root, path);
        if let Err(err) = &result {
            log::debug!("failed to read `{path}`: {err}");
        }
        result
    }

    /// Returns the value at `path` converted into `T`.
    ///
    /// A value that cannot be viewed as `T` is a
    /// [`TypeMismatch`](AccessErrorKind::TypeMismatch).
    pub fn get<'p, T: FromValue>(&self, root: &Value, path: &'p str) -> Result<T, AccessError<'p>> {
        let value = self.get_value(root, path)?;
        let found = value.kind_name();
        T::from_value(value).ok_or_else(|| {
            let err = AccessError::whole_path(AccessErrorKind::TypeMismatch {
                expected: Cow::Borrowed(core::any::type_name::<T>()),
                found,
            });
            log::debug!("failed to read `{path}`: {err}");
            err
        })
    }

    /// Like [`get`](Self::get), discarding the error.
    #[inline]
    pub fn try_get<T: FromValue>(&self, root: &Value, path: &str) -> Option<T> {
        self.get(root, path).ok()
    }

    /// Writes `value` to the member or element at `path`.
    ///
    /// When an error is returned the target has not been written. Every
    /// segment before the last one is still read, so pseudo-properties on the
    /// way run even if the set fails later; use
    /// [`AccessOptions::side_effect_free`] to refuse them.
    pub fn set<'p>(
        &self,
        root: &Value,
        path: &'p str,
        value: impl Into<Value>,
    ) -> Result<(), AccessError<'p>> {
        assert_root(root);
        let result = self.write(root, path, value.into());
        if let Err(err) = &result {
            log::debug!("failed to write `{path}`: {err}");
        }
        result
    }

    fn walk<'p>(&self, root: &Value, path: &'p str) -> Result<Value, AccessError<'p>> {
        let mut current: Option<Value> = None;
        for token in PathTokens::new(path) {
            let token = token?;
            let container = current.as_ref().unwrap_or(root);
            current = Some(self.step(container, &token)?);
        }
        Ok(current.unwrap_or_else(|| root.clone()))
    }

    fn write<'p>(&self, root: &Value, path: &'p str, value: Value) -> Result<(), AccessError<'p>> {
        let mut tokens = PathTokens::new(path);
        let mut deferred = match tokens.next() {
            Some(token) => token?,
            None => {
                return Err(AccessError::whole_path(AccessErrorKind::NotWritable {
                    member: "root",
                    name: path.into(),
                }));
            }
        };

        let mut current: Option<Value> = None;
        for token in tokens {
            let token = token?;
            let container = current.as_ref().unwrap_or(root);
            current = Some(self.step(container, &deferred)?);
            deferred = token;
        }

        let container = current.as_ref().unwrap_or(root);
        let write = DeferredWrite::new(container, &deferred.token);
        debug_only! {
            log::trace!("write `{}` into {}", write.token(), write.container().kind_name());
        }
        write
            .apply(value)
            .map_err(|kind| AccessError::at(kind, &deferred))
    }

    fn step<'p>(&self, container: &Value, token: &OffsetToken<'p>) -> Result<Value, AccessError<'p>> {
        let next = read_step(container, &token.token, self.options)
            .map_err(|kind| AccessError::at(kind, token))?;
        debug_only! {
            log::trace!("`{}` -> {}", token.token, next.kind_name());
        }
        Ok(next)
    }
}

fn assert_root(root: &Value) {
    assert!(!root.is_null(), "path access requires a non-null root value");
}

// -----------------------------------------------------------------------------
// Free functions

/// Returns the value at `path`, see [`PathAccess::get_value`].
///
/// # Panics
///
/// Panics if `root` is [`Value::Null`].
#[inline]
pub fn get_value<'p>(root: &Value, path: &'p str) -> Result<Value, AccessError<'p>> {
    PathAccess::new().get_value(root, path)
}

/// Returns the value at `path` converted into `T`.
///
/// Pseudo-properties on the path are invoked. Use [`PathAccess`] with
/// [`AccessOptions::side_effect_free`] to forbid that.
///
/// # Panics
///
/// Panics if `root` is [`Value::Null`].
///
/// # Examples
///
/// ```
/// use vc_object::{ListRef, TypeBuilder, Value, ValueKind};
///
/// let quest = TypeBuilder::class("Quest")
///     .field("goal", ValueKind::Str)
///     .build()
///     .unwrap();
/// let journal = TypeBuilder::class("Journal")
///     .field("quests", ValueKind::List)
///     .build()
///     .unwrap();
///
/// let root = journal.new_instance();
/// let quests = ListRef::new();
/// for goal in ["find the key", "open the door"] {
///     let it = quest.new_instance();
///     it.as_object().unwrap().set_field("goal", goal).unwrap();
///     quests.push(it);
/// }
/// root.as_object().unwrap().set_field("quests", quests).unwrap();
///
/// let goal: String = vc_path::get(&root, "quests.Array.data[1].goal").unwrap();
/// assert_eq!(goal, "open the door");
/// ```
#[inline]
pub fn get<'p, T: FromValue>(root: &Value, path: &'p str) -> Result<T, AccessError<'p>> {
    PathAccess::new().get(root, path)
}

/// Returns the value at `path` converted into `T`, or `None` on any error.
///
/// # Panics
///
/// Panics if `root` is [`Value::Null`].
#[inline]
pub fn try_get<T: FromValue>(root: &Value, path: &str) -> Option<T> {
    PathAccess::new().try_get(root, path)
}

/// Writes `value` at `path`, see [`PathAccess::set`].
///
/// Pseudo-properties before the last segment are invoked, even when the
/// write then fails.
///
/// # Panics
///
/// Panics if `root` is [`Value::Null`].
///
/// # Examples
///
/// ```
/// use vc_object::{TypeBuilder, ValueKind};
/// use vc_path::AccessErrorKind;
///
/// let point = TypeBuilder::structure("Point")
///     .field("x", ValueKind::Int)
///     .build()
///     .unwrap();
/// let shape = TypeBuilder::class("Shape")
///     .field("origin", ValueKind::Struct(point))
///     .field("sides", ValueKind::Int)
///     .build()
///     .unwrap();
/// let root = shape.new_instance();
///
/// assert!(vc_path::set(&root, "sides", 4).is_ok());
/// assert_eq!(vc_path::get::<i64>(&root, "sides"), Ok(4));
///
/// let err = vc_path::set(&root, "origin.x", 5).unwrap_err();
/// assert!(matches!(err.kind(), AccessErrorKind::ImmutableContainer { .. }));
/// assert_eq!(vc_path::get::<i64>(&root, "origin.x"), Ok(0));
/// ```
#[inline]
pub fn set<'p>(root: &Value, path: &'p str, value: impl Into<Value>) -> Result<(), AccessError<'p>> {
    PathAccess::new().set(root, path, value)
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use vc_object::{ArrayRef, ListRef, Type, TypeBuilder, Value, ValueKind};

    use super::{PathAccess, get, get_value, set, try_get};
    use crate::error::AccessErrorKind;
    use crate::options::AccessOptions;
    use crate::token::Token;

    fn quest_type() -> Type {
        TypeBuilder::class("Quest")
            .field("goal", ValueKind::Str)
            .build()
            .unwrap()
    }

    fn journal(goals: &[&str]) -> Value {
        let quest = quest_type();
        let journal = TypeBuilder::class("Journal")
            .field("quests", ValueKind::List)
            .build()
            .unwrap();

        let quests = ListRef::new();
        for goal in goals {
            let it = quest.new_instance();
            it.as_object().unwrap().set_field("goal", *goal).unwrap();
            quests.push(it);
        }
        let root = journal.new_instance();
        root.as_object().unwrap().set_field("quests", quests).unwrap();
        root
    }

    struct Fixture {
        actor: Type,
        root: Value,
        heals: Rc<Cell<u32>>,
    }

    fn fixture() -> Fixture {
        let vec2 = TypeBuilder::structure("Vec2")
            .field("x", ValueKind::Float)
            .field("y", ValueKind::Float)
            .build()
            .unwrap();
        let actor = TypeBuilder::class("Actor")
            .field("hp", ValueKind::Int)
            .field("name", ValueKind::Str)
            .static_field("count", ValueKind::Int, 0)
            .property("title", |this| {
                this.as_object().unwrap().field("name").unwrap()
            })
            .build()
            .unwrap();

        let heals = Rc::new(Cell::new(0));
        let counter = heals.clone();
        let player = TypeBuilder::class("Player")
            .extends(&actor)
            .field("hp", ValueKind::Float)
            .field("position", ValueKind::Struct(vec2))
            .field("scores", ValueKind::Array)
            .field("pet", ValueKind::Object(actor.clone()))
            .field("secret", ValueKind::Str)
            .non_public()
            .pseudo_property("heal", move |this| {
                counter.set(counter.get() + 1);
                let obj = this.as_object().unwrap();
                let hp = obj.field("hp").and_then(|v| v.as_float()).unwrap() + 10.0;
                obj.set_field("hp", hp).unwrap();
                Value::Float(hp)
            })
            .build()
            .unwrap();

        let root = player.new_instance();
        let obj = root.as_object().unwrap();
        obj.set_field("name", "hero").unwrap();
        obj.set_field("secret", "xyzzy").unwrap();
        let scores: ArrayRef = [10, 20, 30].into_iter().map(Value::Int).collect();
        obj.set_field("scores", scores).unwrap();

        Fixture { actor, root, heals }
    }

    #[test]
    fn scenario_quest_list() {
        let root = journal(&["A", "B"]);
        let path = "quests.Array.data[1].goal";

        assert_eq!(get::<String>(&root, path).unwrap(), "B");
        assert!(set(&root, path, "C").is_ok());
        assert_eq!(get::<String>(&root, path).unwrap(), "C");

        let err = get_value(&root, "quests.Array.data[5].goal").unwrap_err();
        assert_eq!(err.kind(), &AccessErrorKind::IndexOutOfRange { index: 5, len: 2 });
        assert_eq!(err.token(), Some(&Token::ElementIndex(5)));
        assert_eq!(err.offset(), Some(7));
    }

    #[test]
    fn scenario_missing_member() {
        let root = journal(&["A"]);
        let missing = AccessErrorKind::MemberNotFound {
            ty: "Journal".into(),
            name: "Nonexistent".into(),
        };

        let err = get_value(&root, "Nonexistent.Field").unwrap_err();
        assert_eq!(err.kind(), &missing);

        let err = set(&root, "Nonexistent.Field", 1).unwrap_err();
        assert_eq!(err.kind(), &missing);
        assert_eq!(
            get::<String>(&root, "quests.Array.data[0].goal").unwrap(),
            "A"
        );
    }

    #[test]
    fn set_of_get_is_identity() {
        let Fixture { root, .. } = fixture();
        for path in ["hp", "name", "position", "scores", "scores.Array.data[2]", "pet"] {
            let before = get_value(&root, path).unwrap();
            set(&root, path, before.clone()).unwrap();
            assert_eq!(get_value(&root, path).unwrap(), before, "{path}");
        }
    }

    #[test]
    fn writes_through_reference_container_are_visible() {
        let Fixture { actor, root, .. } = fixture();
        set(&root, "pet", actor.new_instance()).unwrap();

        set(&root, "pet.hp", 12).unwrap();
        assert_eq!(get::<i64>(&root, "pet.hp"), Ok(12));

        set(&root, "scores.Array.data[1]", 99).unwrap();
        assert_eq!(get::<i64>(&root, "scores.Array.data[1]"), Ok(99));
    }

    #[test]
    fn struct_member_write_is_rejected() {
        let Fixture { root, .. } = fixture();

        let err = set(&root, "position.x", 3.0).unwrap_err();
        assert_eq!(err.kind(), &AccessErrorKind::ImmutableContainer { ty: "Vec2".into() });
        assert_eq!(err.token(), Some(&Token::MemberName("x".into())));
        assert_eq!(get::<f64>(&root, "position.x"), Ok(0.0));

        let position = get_value(&root, "position").unwrap();
        let err = set(&position, "x", 3.0).unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::ImmutableContainer { .. }));
    }

    #[test]
    fn every_index_is_reachable() {
        let Fixture { root, .. } = fixture();
        for (i, expected) in [10, 20, 30].into_iter().enumerate() {
            let path = alloc::format!("scores.Array.data[{i}]");
            assert_eq!(get::<i64>(&root, &path), Ok(expected));
        }

        let goals = ["a", "b", "c", "d"];
        let root = journal(&goals);
        for (i, expected) in goals.into_iter().enumerate() {
            let path = alloc::format!("quests.Array.data[{i}].goal");
            assert_eq!(try_get::<String>(&root, &path).as_deref(), Some(expected));
        }
    }

    #[test]
    fn nested_collections() {
        let rows: ListRef = (0..3)
            .map(|row| {
                let cells: ArrayRef = (0..2).map(|col| Value::Int(row * 10 + col)).collect();
                Value::Array(cells)
            })
            .collect();
        let grid = TypeBuilder::class("Grid")
            .field("rows", ValueKind::List)
            .build()
            .unwrap();
        let root = grid.new_instance();
        set(&root, "rows", rows).unwrap();

        assert_eq!(get::<i64>(&root, "rows.Array.data[2].Array.data[1]"), Ok(21));
        set(&root, "rows.Array.data[0].Array.data[0]", -1).unwrap();
        assert_eq!(get::<i64>(&root, "rows.Array.data[0].Array.data[0]"), Ok(-1));
    }

    #[test]
    fn struct_element_write_is_rejected() {
        let point = TypeBuilder::structure("P")
            .field("x", ValueKind::Int)
            .build()
            .unwrap();
        let holder = TypeBuilder::class("Holder")
            .field("l", ValueKind::List)
            .build()
            .unwrap();
        let root = holder.new_instance();
        let points: ListRef = [point.new_instance(), point.new_instance()]
            .into_iter()
            .collect();
        set(&root, "l", points).unwrap();

        let err = set(&root, "l.Array.data[0].x", 5).unwrap_err();
        assert_eq!(err.kind(), &AccessErrorKind::ImmutableContainer { ty: "P".into() });
        assert_eq!(get_value(&root, "l.Array.data[0].x"), Ok(Value::Int(0)));

        // Replacing the whole element is the observable way to change it.
        let mut edited = get_value(&root, "l.Array.data[0]").unwrap();
        if let Value::Struct(val) = &mut edited {
            val.set_field("x", 5).unwrap();
        }
        set(&root, "l.Array.data[0]", edited).unwrap();
        assert_eq!(get::<i64>(&root, "l.Array.data[0].x"), Ok(5));
    }

    #[test]
    fn failed_set_still_runs_methods_on_the_way() {
        let inner = TypeBuilder::class("Inner").build().unwrap();
        let calls = Rc::new(Cell::new(0_u32));
        let counter = calls.clone();
        let outer = TypeBuilder::class("Outer")
            .pseudo_property("make", move |_| {
                counter.set(counter.get() + 1);
                inner.new_instance()
            })
            .build()
            .unwrap();
        let root = outer.new_instance();

        let err = set(&root, "make.missing", 1).unwrap_err();
        assert_eq!(
            err.kind(),
            &AccessErrorKind::MemberNotFound {
                ty: "Inner".into(),
                name: "missing".into()
            }
        );
        assert_eq!(calls.get(), 1);

        let pure = PathAccess::with_options(AccessOptions::side_effect_free());
        let err = pure.set(&root, "make.missing", 1).unwrap_err();
        assert_eq!(err.kind(), &AccessErrorKind::MethodCallDenied { name: "make".into() });
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn bad_indices_fail_without_panicking() {
        let Fixture { root, .. } = fixture();

        let err = get_value(&root, "scores.Array.data[3]").unwrap_err();
        assert_eq!(err.kind(), &AccessErrorKind::IndexOutOfRange { index: 3, len: 3 });

        let err = get_value(&root, "scores.Array.data[-1]").unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::ParseError(_)));
        assert_eq!(err.offset(), Some(18));

        let err = set(&root, "scores.Array.data[-1]", 0).unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::ParseError(_)));

        let err = set(&root, "scores.Array.data[9]", 0).unwrap_err();
        assert_eq!(err.kind(), &AccessErrorKind::IndexOutOfRange { index: 9, len: 3 });
        assert_eq!(get::<i64>(&root, "scores.Array.data[2]"), Ok(30));
    }

    #[test]
    fn parse_error_stops_set_before_writing() {
        let Fixture { root, .. } = fixture();
        let err = set(&root, "name.Array.data[x]", "villain").unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::ParseError(_)));
        assert_eq!(get::<String>(&root, "name").unwrap(), "hero");
    }

    #[test]
    fn derived_field_shadows_base_field() {
        let Fixture { root, .. } = fixture();

        assert_eq!(get::<f64>(&root, "hp"), Ok(0.0));
        set(&root, "hp", 55.5).unwrap();
        assert_eq!(get::<f64>(&root, "hp"), Ok(55.5));

        let err = set(&root, "hp", 5).unwrap_err();
        assert!(matches!(
            err.kind(),
            AccessErrorKind::TypeMismatch { found: "Int", .. }
        ));
    }

    #[test]
    fn static_and_private_members() {
        let Fixture { actor, root, .. } = fixture();

        set(&root, "count", 7).unwrap();
        assert_eq!(get::<i64>(&root, "count"), Ok(7));
        assert_eq!(actor.read_static(0), Ok(Value::Int(7)));

        assert_eq!(get::<String>(&root, "secret").unwrap(), "xyzzy");
        set(&root, "secret", "plugh").unwrap();
        assert_eq!(get::<String>(&root, "secret").unwrap(), "plugh");
    }

    #[test]
    fn read_only_property() {
        let Fixture { root, .. } = fixture();

        assert_eq!(get::<String>(&root, "title").unwrap(), "hero");
        let err = set(&root, "title", "king").unwrap_err();
        assert_eq!(
            err.kind(),
            &AccessErrorKind::NotWritable {
                member: "property",
                name: "title".into()
            }
        );
    }

    #[test]
    fn pseudo_properties_run_only_when_allowed() {
        let Fixture { root, heals, .. } = fixture();

        assert_eq!(get::<f64>(&root, "heal"), Ok(10.0));
        assert_eq!(heals.get(), 1);
        assert_eq!(get::<f64>(&root, "hp"), Ok(10.0));

        let pure = PathAccess::with_options(AccessOptions::side_effect_free());
        let err = pure.get_value(&root, "heal").unwrap_err();
        assert_eq!(err.kind(), &AccessErrorKind::MethodCallDenied { name: "heal".into() });
        assert_eq!(heals.get(), 1);

        let err = set(&root, "heal", 1.0).unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::NotWritable { member: "method", .. }));
        assert_eq!(heals.get(), 1);
    }

    #[test]
    fn null_intermediate() {
        let Fixture { root, .. } = fixture();

        assert_eq!(get_value(&root, "pet"), Ok(Value::Null));
        assert_eq!(get::<Option<String>>(&root, "pet"), Ok(None));

        let err = get_value(&root, "pet.hp").unwrap_err();
        assert_eq!(err.kind(), &AccessErrorKind::NullIntermediate);
        assert_eq!(err.offset(), Some(4));

        let err = set(&root, "pet.hp", 1).unwrap_err();
        assert_eq!(err.kind(), &AccessErrorKind::NullIntermediate);
    }

    #[test]
    fn conversion_and_shape_mismatches() {
        let Fixture { root, .. } = fixture();

        let err = get::<String>(&root, "scores").unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::TypeMismatch { found: "Array", .. }));
        assert!(err.token().is_none());
        assert_eq!(try_get::<bool>(&root, "name"), None);

        let err = get_value(&root, "name.Array.data[0]").unwrap_err();
        assert_eq!(err.kind(), &AccessErrorKind::NotCollection { found: "Str" });

        let err = get_value(&root, "name.length").unwrap_err();
        assert_eq!(
            err.kind(),
            &AccessErrorKind::MemberNotFound {
                ty: "Str".into(),
                name: "length".into()
            }
        );
    }

    #[test]
    fn empty_path() {
        let Fixture { root, .. } = fixture();

        assert_eq!(get_value(&root, ""), Ok(root.clone()));
        let err = set(&root, "", 1).unwrap_err();
        assert!(matches!(err.kind(), AccessErrorKind::NotWritable { member: "root", .. }));
    }

    #[test]
    #[should_panic(expected = "non-null root")]
    fn null_root_panics() {
        let _ = get_value(&Value::Null, "anything");
    }

    #[test]
    fn errors_outlive_temporary_paths() {
        let Fixture { root, .. } = fixture();
        let errors: Vec<_> = (0..2)
            .map(|i| {
                let path = alloc::format!("missing{i}");
                get_value(&root, &path).unwrap_err().into_owned()
            })
            .collect();
        assert_eq!(errors[1].token(), Some(&Token::MemberName("missing1".into())));
    }
}
