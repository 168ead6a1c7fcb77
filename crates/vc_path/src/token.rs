//! Path tokenizer.
//!
//! A path is a `.`-separated list of segments. Every segment is a member name,
//! except the synthetic segment `Array.data[N]` which selects element `N` of
//! an ordered collection:
//!
//! ```text
//! quests.Array.data[1].goal
//! ^^^^^^ ^^^^^^^^^^^^^ ^^^^
//! member element(1)    member
//! ```
//!
//! Tokens are produced one at a time by [`next_token`] or [`PathTokens`];
//! nothing is parsed ahead of the segment being consumed.

use alloc::borrow::Cow;
use core::fmt;

use thiserror::Error;

/// Prefix of a collection index segment, up to the opening bracket.
pub const INDEX_PREFIX: &str = "Array.data[";

const DELIMITER: char = '.';
const INDEX_END: char = ']';

// -----------------------------------------------------------------------------
// Token

/// One parsed segment of a path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token<'a> {
    /// A field, property or pseudo-property name.
    MemberName(Cow<'a, str>),
    /// A zero-based index into an ordered collection.
    ElementIndex(usize),
}

impl Token<'_> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> Token<'static> {
        match self {
            Self::MemberName(name) => Token::MemberName(Cow::Owned(name.into_owned())),
            Self::ElementIndex(index) => Token::ElementIndex(index),
        }
    }
}

/// Formats the token as the path segment it was parsed from.
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MemberName(name) => f.write_str(name),
            Self::ElementIndex(index) => write!(f, "{INDEX_PREFIX}{index}{INDEX_END}"),
        }
    }
}

/// A [`Token`] together with the byte offset of its segment in the path.
///
/// `offset` is only used to report errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OffsetToken<'a> {
    pub token: Token<'a>,
    pub offset: usize,
}

impl OffsetToken<'_> {
    /// Converts this into an "owned" value.
    #[inline]
    pub fn into_owned(self) -> OffsetToken<'static> {
        OffsetToken {
            token: self.token.into_owned(),
            offset: self.offset,
        }
    }
}

// -----------------------------------------------------------------------------
// Error

/// A malformed collection index segment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Encountered an error at offset {offset} while parsing `{path}`: {error}")]
pub struct ParseError<'a> {
    /// Position in `path`.
    pub offset: usize,
    /// The path that the error occurred in.
    pub path: &'a str,
    /// The underlying error.
    pub error: &'static str,
}

// -----------------------------------------------------------------------------
// Tokenizer

/// Parses the segment starting at byte `cursor`.
///
/// Returns the token and the cursor of the following segment, or `None` once
/// `cursor` reaches the end of `path`.
///
/// # Examples
///
/// ```
/// use vc_path::token::{Token, next_token};
///
/// let path = "list.Array.data[3].name";
///
/// let (token, cursor) = next_token(path, 0).unwrap().unwrap();
/// assert_eq!(token, Token::MemberName("list".into()));
///
/// let (token, cursor) = next_token(path, cursor).unwrap().unwrap();
/// assert_eq!(token, Token::ElementIndex(3));
///
/// let (token, cursor) = next_token(path, cursor).unwrap().unwrap();
/// assert_eq!(token, Token::MemberName("name".into()));
///
/// assert!(next_token(path, cursor).is_none());
/// ```
pub fn next_token(path: &str, cursor: usize) -> Option<Result<(Token<'_>, usize), ParseError<'_>>> {
    let rest = path.get(cursor..).filter(|rest| !rest.is_empty())?;

    if let Some(after) = rest.strip_prefix(INDEX_PREFIX) {
        return Some(parse_index(path, cursor, after));
    }

    let token_end = rest.find(DELIMITER).unwrap_or(rest.len());
    let name = &rest[..token_end];
    let next = if token_end < rest.len() {
        cursor + token_end + DELIMITER.len_utf8()
    } else {
        path.len()
    };
    Some(Ok((Token::MemberName(Cow::Borrowed(name)), next)))
}

// `after` is the text following `Array.data[` in a segment starting at `cursor`.
fn parse_index<'a>(
    path: &'a str,
    cursor: usize,
    after: &str,
) -> Result<(Token<'a>, usize), ParseError<'a>> {
    let error = |offset: usize, error: &'static str| ParseError {
        offset,
        path,
        error,
    };

    let digits_start = cursor + INDEX_PREFIX.len();
    let close = after
        .find(INDEX_END)
        .ok_or_else(|| error(cursor, "missing `]` after collection index"))?;
    let digits = &after[..close];

    if digits.is_empty() {
        return Err(error(digits_start, "empty collection index"));
    }
    if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(error(
            digits_start,
            "collection index must be a non-negative decimal integer",
        ));
    }
    let index = digits
        .parse::<usize>()
        .map_err(|_| error(digits_start, "collection index is too large"))?;

    let token_end = digits_start + close + INDEX_END.len_utf8();
    let next = match path[token_end..].chars().next() {
        None => token_end,
        Some(DELIMITER) => token_end + DELIMITER.len_utf8(),
        Some(_) => return Err(error(token_end, "expected `.` after collection index")),
    };
    Ok((Token::ElementIndex(index), next))
}

// -----------------------------------------------------------------------------
// PathTokens

/// A lazy iterator over the tokens of a path.
///
/// Each call to `next` parses exactly one segment. After a parse error the
/// iterator is exhausted.
///
/// # Examples
///
/// ```
/// use vc_path::token::{PathTokens, Token};
///
/// let tokens: Vec<_> = PathTokens::new("a.Array.data[0]")
///     .map(|res| res.unwrap().token)
///     .collect();
/// assert_eq!(tokens, [Token::MemberName("a".into()), Token::ElementIndex(0)]);
///
/// let mut tokens = PathTokens::new("a.Array.data[x].b");
/// assert!(tokens.next().unwrap().is_ok());
/// assert!(tokens.next().unwrap().is_err());
/// assert!(tokens.next().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PathTokens<'a> {
    path: &'a str,
    cursor: usize,
}

impl<'a> PathTokens<'a> {
    /// Starts tokenizing `path` from its first segment.
    #[inline]
    pub const fn new(path: &'a str) -> Self {
        Self { path, cursor: 0 }
    }

    /// Returns the path being tokenized.
    #[inline]
    pub const fn path(&self) -> &'a str {
        self.path
    }
}

impl<'a> Iterator for PathTokens<'a> {
    type Item = Result<OffsetToken<'a>, ParseError<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.cursor;
        match next_token(self.path, offset)? {
            Ok((token, next)) => {
                self.cursor = next;
                Some(Ok(OffsetToken { token, offset }))
            }
            Err(err) => {
                self.cursor = self.path.len();
                Some(Err(err))
            }
        }
    }
}
