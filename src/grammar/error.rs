//! Error types for SQL fragment compilation.

use std::fmt;

use crate::jsonpath::JsonPathError;

/// Errors that can occur while compiling a path into a SQL fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A negative index was supplied where only magnitude-based update
    /// paths are accepted.
    NegativeIndex { magnitude: u64 },
    /// An existence test was requested on a bare column with no hops.
    EmptyPath { column: String },
    /// A statement that needs a target table was rendered before one
    /// was set.
    MissingTable,
    /// The path string itself failed to parse.
    Path(JsonPathError),
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::NegativeIndex { magnitude } => write!(
                f,
                "Negative index -{} is not supported in update paths",
                magnitude
            ),
            GrammarError::EmptyPath { column } => {
                write!(f, "Path '{}' has no segments to test for existence", column)
            }
            GrammarError::MissingTable => {
                write!(f, "No table set; call from() before rendering the statement")
            }
            GrammarError::Path(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GrammarError::Path(err) => Some(err),
            _ => None,
        }
    }
}

impl From<JsonPathError> for GrammarError {
    fn from(err: JsonPathError) -> Self {
        GrammarError::Path(err)
    }
}
