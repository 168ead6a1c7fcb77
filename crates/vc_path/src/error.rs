use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;

use thiserror::Error;
use vc_object::StorageError;
use vc_object::WriteError;
use vc_object::ops::ElementError;

use crate::token::{OffsetToken, ParseError, Token};

// -----------------------------------------------------------------------------
// AccessErrorKind

/// The kind of [`AccessError`], along with some kind-specific information.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AccessErrorKind {
    /// No member of that name on the container's type or any of its bases.
    ///
    /// `ty` is the type name, or the kind name for containers without
    /// members (primitives, arrays, lists).
    #[error("`{ty}` has no member named `{name}`")]
    MemberNotFound { ty: Box<str>, name: Box<str> },

    /// A step before the last one produced `null`.
    #[error("cannot step into a null value")]
    NullIntermediate,

    /// A value of the wrong kind was read or written.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: Cow<'static, str>,
        found: &'static str,
    },

    /// The final member can never be written: a read-only property, a
    /// method, or the root of an empty path.
    #[error("{member} `{name}` is not writable")]
    NotWritable { member: &'static str, name: Box<str> },

    /// The container of the final member is a value-type copy, so the write
    /// could not be observed through the root.
    #[error("`{ty}` is a value type; writing into a copy of it is rejected")]
    ImmutableContainer { ty: Box<str> },

    /// A malformed `Array.data[N]` segment.
    #[error("{0}")]
    ParseError(&'static str),

    /// An index segment was applied to something that is not an array or list.
    #[error("cannot index into {found}")]
    NotCollection { found: &'static str },

    #[error("index {index} is out of range for a collection of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    /// A pseudo-property was reached while method calls are denied.
    #[error("calling method `{name}` is denied by the access options")]
    MethodCallDenied { name: Box<str> },

    /// A property or method re-entered storage that is being accessed.
    #[error("storage was re-entered while it was borrowed")]
    Reentrant,

    /// A property setter refused the value.
    #[error("property setter failed: {0}")]
    SetterFailed(WriteError),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for AccessErrorKind {
    #[inline]
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Busy => Self::Reentrant,
            other => Self::Storage(other),
        }
    }
}

impl From<ElementError> for AccessErrorKind {
    #[inline]
    fn from(value: ElementError) -> Self {
        match value {
            ElementError::OutOfRange { index, len } => Self::IndexOutOfRange { index, len },
            ElementError::Storage(err) => err.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// AccessError

/// An error from [`get`](crate::get) or [`set`](crate::set), pointing at the
/// path segment that failed.
///
/// Use the `Display` impl of this type to get information on the error.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessError<'a> {
    kind: AccessErrorKind,
    token: Option<Token<'a>>,
    offset: Option<usize>,
}

impl<'a> AccessError<'a> {
    #[inline]
    pub(crate) fn at(kind: AccessErrorKind, token: &OffsetToken<'a>) -> Self {
        Self {
            kind,
            token: Some(token.token.clone()),
            offset: Some(token.offset),
        }
    }

    /// An error that belongs to the path as a whole rather than one segment.
    #[inline]
    pub(crate) const fn whole_path(kind: AccessErrorKind) -> Self {
        Self {
            kind,
            token: None,
            offset: None,
        }
    }

    /// Returns the kind of [`AccessError`].
    #[inline]
    pub fn kind(&self) -> &AccessErrorKind {
        &self.kind
    }

    /// Returns the [`Token`] that this error occurred in, if any.
    ///
    /// Parse errors and errors that concern the whole path have no token.
    #[inline]
    pub fn token(&self) -> Option<&Token<'a>> {
        self.token.as_ref()
    }

    /// Returns the byte offset in the path where the error occurred.
    #[inline]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    /// Converts this into an "owned" value.
    pub fn into_owned(self) -> AccessError<'static> {
        AccessError {
            kind: self.kind,
            token: self.token.map(Token::into_owned),
            offset: self.offset,
        }
    }
}

impl From<ParseError<'_>> for AccessError<'_> {
    #[inline]
    fn from(value: ParseError<'_>) -> Self {
        Self {
            kind: AccessErrorKind::ParseError(value.error),
            token: None,
            offset: Some(value.offset),
        }
    }
}

impl fmt::Display for AccessError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(f, "Error accessing `{token}`")?,
            None => f.write_str("Error accessing path")?,
        }
        if let Some(offset) = self.offset {
            write!(f, " (offset {offset})")?;
        }
        write!(f, ": {}", self.kind)
    }
}

impl core::error::Error for AccessError<'_> {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_names_token_and_offset() {
        let token = OffsetToken {
            token: Token::ElementIndex(4),
            offset: 6,
        };
        let err = AccessError::at(AccessErrorKind::IndexOutOfRange { index: 4, len: 2 }, &token);
        assert_eq!(
            err.to_string(),
            "Error accessing `Array.data[4]` (offset 6): \
             index 4 is out of range for a collection of 2 elements",
        );

        let err = AccessError::whole_path(AccessErrorKind::NullIntermediate);
        assert_eq!(err.to_string(), "Error accessing path: cannot step into a null value");
    }

    #[test]
    fn storage_errors_map_to_kinds() {
        assert_eq!(AccessErrorKind::from(StorageError::Busy), AccessErrorKind::Reentrant);
        assert_eq!(
            AccessErrorKind::from(ElementError::OutOfRange { index: 3, len: 1 }),
            AccessErrorKind::IndexOutOfRange { index: 3, len: 1 },
        );
    }

    #[test]
    fn parse_errors_keep_offset() {
        let err: AccessError<'_> = ParseError {
            offset: 13,
            path: "l.Array.data[-1]",
            error: "collection index must be a non-negative decimal integer",
        }
        .into();
        assert!(matches!(err.kind(), AccessErrorKind::ParseError(_)));
        assert_eq!(err.offset(), Some(13));
        assert!(err.token().is_none());
    }
}
