//! Runtime options of a [`PathAccess`](crate::PathAccess).

/// Whether pseudo-properties (zero-argument methods) may be invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MethodCalls {
    /// Invoke them like getters.
    #[default]
    Invoke,
    /// Fail with [`MethodCallDenied`](crate::AccessErrorKind::MethodCallDenied)
    /// instead of running the method.
    Deny,
}

/// Options shared by every call of a [`PathAccess`](crate::PathAccess).
///
/// The default invokes pseudo-properties, matching the free functions
/// [`get`](crate::get) and [`set`](crate::set).
///
/// # Examples
///
/// ```
/// use vc_path::{AccessOptions, MethodCalls};
///
/// assert_eq!(AccessOptions::default().method_calls, MethodCalls::Invoke);
/// assert_eq!(AccessOptions::side_effect_free().method_calls, MethodCalls::Deny);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AccessOptions {
    pub method_calls: MethodCalls,
}

impl AccessOptions {
    #[inline]
    pub const fn new() -> Self {
        Self {
            method_calls: MethodCalls::Invoke,
        }
    }

    /// Options that refuse to run pseudo-properties.
    ///
    /// Property getters still run; they are expected to be pure.
    #[inline]
    pub const fn side_effect_free() -> Self {
        Self {
            method_calls: MethodCalls::Deny,
        }
    }

    #[inline]
    pub const fn with_method_calls(mut self, method_calls: MethodCalls) -> Self {
        self.method_calls = method_calls;
        self
    }
}
