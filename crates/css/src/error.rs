//! CSS parsing error types

use std::fmt;
use thiserror::Error;

/// CSS parsing result type
pub type CssResult<T> = Result<T, CssError>;

/// Source location in CSS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from start
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// CSS parsing errors
///
/// Lexical errors surface as `UnexpectedToken` over INVALID tokens,
/// syntactic errors as `UnexpectedToken` / `ExpectedToken` /
/// `UnexpectedEof`, and semantic (value resolution) errors as
/// `InvalidValue` / `InvalidColor`. All of them are recoverable; the
/// parser appends them to its error sink and continues.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CssError {
    #[error("Unexpected token '{token}' at {location}")]
    UnexpectedToken {
        token: String,
        location: SourceLocation,
    },

    #[error("Expected {expected} but found '{found}' at {location}")]
    ExpectedToken {
        expected: String,
        found: String,
        location: SourceLocation,
    },

    #[error("Unexpected end of file at {location}")]
    UnexpectedEof {
        location: SourceLocation,
    },

    #[error("Invalid selector at {location}: {message}")]
    InvalidSelector {
        message: String,
        location: SourceLocation,
    },

    #[error("Invalid color '{color}' at {location}")]
    InvalidColor {
        color: String,
        location: SourceLocation,
    },

    #[error("Invalid value at {location}: {message}")]
    InvalidValue {
        message: String,
        location: SourceLocation,
    },

    #[error("Unterminated string at {location}")]
    UnterminatedString {
        location: SourceLocation,
    },

    #[error("Parse error: {message} at {location}")]
    ParseError {
        message: String,
        location: SourceLocation,
    },
}

impl CssError {
    /// Get the source location of this error
    pub fn location(&self) -> SourceLocation {
        match self {
            Self::UnexpectedToken { location, .. } => *location,
            Self::ExpectedToken { location, .. } => *location,
            Self::UnexpectedEof { location } => *location,
            Self::InvalidSelector { location, .. } => *location,
            Self::InvalidColor { location, .. } => *location,
            Self::InvalidValue { location, .. } => *location,
            Self::UnterminatedString { location } => *location,
            Self::ParseError { location, .. } => *location,
        }
    }

    pub fn unexpected_token(token: impl Into<String>, location: SourceLocation) -> Self {
        Self::UnexpectedToken { token: token.into(), location }
    }

    pub fn expected(
        expected: impl Into<String>,
        found: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self::ExpectedToken {
            expected: expected.into(),
            found: found.into(),
            location,
        }
    }

    pub fn unexpected_eof(location: SourceLocation) -> Self {
        Self::UnexpectedEof { location }
    }

    pub fn invalid_selector(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::InvalidSelector { message: message.into(), location }
    }

    pub fn invalid_color(color: impl Into<String>, location: SourceLocation) -> Self {
        Self::InvalidColor { color: color.into(), location }
    }

    pub fn invalid_value(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::InvalidValue { message: message.into(), location }
    }

    pub fn parse_error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::ParseError { message: message.into(), location }
    }
}
