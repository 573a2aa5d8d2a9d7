//! Error types for jsonb path parsing.

use std::fmt;

/// Errors that can occur while parsing a jsonb path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonPathError {
    /// Unexpected end of input.
    UnexpectedEnd { expected: String },
    /// Bracket content that is not a valid integer index.
    InvalidIndex { found: String },
    /// Invalid syntax with description.
    InvalidSyntax { message: String },
}

impl fmt::Display for JsonPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonPathError::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            JsonPathError::InvalidIndex { found } => {
                write!(f, "Invalid array index '{}'", found)
            }
            JsonPathError::InvalidSyntax { message } => {
                write!(f, "Invalid path syntax: {}", message)
            }
        }
    }
}

impl std::error::Error for JsonPathError {}
