//! Error types for resource URI construction and path-set building.

use std::fmt;

/// Errors raised by [`ResourceUriBuilder`](crate::ResourceUriBuilder).
///
/// These are programming contract violations and are surfaced immediately;
/// the builder never recovers from them on the caller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// A suffix was supplied that does not start with `/`.
    SuffixMissingLeadingSlash {
        /// The rejected suffix value.
        value: String,
    },
    /// `build()` was called on a builder that already produced its URI.
    AlreadyConsumed,
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SuffixMissingLeadingSlash { value } => {
                write!(f, "suffix '{value}' must start with '/'")
            }
            Self::AlreadyConsumed => {
                write!(f, "builder already consumed; create a new builder per URI")
            }
        }
    }
}

impl std::error::Error for BuilderError {}

/// Errors raised while building a [`PathSet`](crate::PathSet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSetError {
    /// A `glob:` entry failed to compile as a glob pattern.
    InvalidPattern {
        /// The rejected entry text, including the `glob:` marker.
        pattern: String,
        /// Why compilation failed.
        reason: String,
    },
}

impl fmt::Display for PathSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "invalid glob pattern '{pattern}': {reason}")
            }
        }
    }
}

impl std::error::Error for PathSetError {}

/// Error produced by the strict URI splitter.
///
/// This type never escapes [`split_uri`](crate::split_uri): a strict failure
/// only routes the input to the permissive best-effort decomposition. It is
/// public for callers of [`strict_split`](crate::strict_split).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriSyntaxError {
    /// The input that failed strict parsing.
    pub input: String,
    /// The specific violation.
    pub kind: UriSyntaxErrorKind,
}

/// Specific strict-parse violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriSyntaxErrorKind {
    /// The input starts with `:` (a scheme separator with no scheme).
    EmptyScheme,
    /// The scheme contains a character outside `ALPHA (ALPHA/DIGIT/+/-/.)*`.
    InvalidSchemeChar {
        /// The offending character.
        char: char,
        /// Byte position within the scheme.
        position: usize,
    },
    /// The authority port is empty or not a decimal `u16`.
    InvalidPort {
        /// The rejected port text.
        value: String,
    },
    /// The authority contains whitespace or a control character.
    InvalidAuthorityChar {
        /// The offending character.
        char: char,
        /// Byte position within the authority.
        position: usize,
    },
}

impl fmt::Display for UriSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid URI '{}': ", self.input)?;
        match &self.kind {
            UriSyntaxErrorKind::EmptyScheme => write!(f, "scheme is empty"),
            UriSyntaxErrorKind::InvalidSchemeChar { char, position } => {
                write!(f, "invalid character '{char}' at scheme position {position}")
            }
            UriSyntaxErrorKind::InvalidPort { value } => {
                write!(f, "invalid port '{value}'")
            }
            UriSyntaxErrorKind::InvalidAuthorityChar { char, position } => {
                write!(f, "invalid character '{char}' at authority position {position}")
            }
        }
    }
}

impl std::error::Error for UriSyntaxError {}
