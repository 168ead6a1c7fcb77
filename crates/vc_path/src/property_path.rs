use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::token::{ParseError, PathTokens, Token};

/// An owned, pre-parsed path.
///
/// Builds path strings in the `Array.data[N]` grammar, and keeps parsed
/// paths around for callers that reuse them. Displaying a path produces the
/// string form accepted by [`get`](crate::get) and [`set`](crate::set).
///
/// Member names must not contain `.`.
///
/// # Examples
///
/// ```
/// use vc_path::PropertyPath;
///
/// let path = PropertyPath::new().member("quests").element(1).member("goal");
/// assert_eq!(path.to_string(), "quests.Array.data[1].goal");
///
/// let parsed = PropertyPath::parse("quests.Array.data[1].goal").unwrap();
/// assert_eq!(parsed, path);
/// assert_eq!(parsed.parent().unwrap().to_string(), "quests.Array.data[1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PropertyPath(Vec<Token<'static>>);

impl PropertyPath {
    /// Creates an empty path, which addresses the root itself.
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a member segment.
    #[inline]
    pub fn member(mut self, name: impl Into<String>) -> Self {
        self.push(Token::MemberName(Cow::Owned(name.into())));
        self
    }

    /// Appends an `Array.data[index]` segment.
    #[inline]
    pub fn element(mut self, index: usize) -> Self {
        self.push(Token::ElementIndex(index));
        self
    }

    #[inline]
    pub fn push(&mut self, token: Token<'_>) {
        self.0.push(token.into_owned());
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Token<'static>> {
        self.0.pop()
    }

    /// Parses every segment of `path` up front.
    pub fn parse(path: &str) -> Result<Self, ParseError<'_>> {
        PathTokens::new(path)
            .map(|res| res.map(|it| it.token.into_owned()))
            .collect::<Result<_, _>>()
            .map(Self)
    }

    /// Returns the path without its last segment, or `None` for an empty path.
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.0.split_last()?;
        Some(Self(parent.to_vec()))
    }

    #[inline]
    pub fn tokens(&self) -> &[Token<'static>] {
        &self.0
    }

    #[inline]
    pub fn last(&self) -> Option<&Token<'static>> {
        self.0.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            fmt::Display::fmt(token, f)?;
        }
        Ok(())
    }
}

impl<'a> FromIterator<Token<'a>> for PropertyPath {
    fn from_iter<T: IntoIterator<Item = Token<'a>>>(iter: T) -> Self {
        Self(iter.into_iter().map(Token::into_owned).collect())
    }
}
