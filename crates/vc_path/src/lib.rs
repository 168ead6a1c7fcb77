#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Macros

/// Runs the enclosed statements only in debug builds with the `debug`
/// feature enabled.
macro_rules! debug_only {
    ($($tt:tt)*) => {
        if cfg!(all(debug_assertions, feature = "debug")) {
            $($tt)*
        }
    };
}

// -----------------------------------------------------------------------------
// Modules

mod access;
mod error;
mod options;
mod property_path;
mod resolve;

pub mod token;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use access::{DeferredWrite, PathAccess, get, get_value, set, try_get};
pub use error::{AccessError, AccessErrorKind};
pub use options::{AccessOptions, MethodCalls};
pub use property_path::PropertyPath;
pub use resolve::{ResolvedMember, resolve_member};
pub use token::{ParseError, PathTokens, Token};
