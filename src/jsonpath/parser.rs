//! jsonb path expression parser.

use super::ast::{JsonPath, PathSegment};
use super::error::JsonPathError;

/// Parser for jsonb path expressions.
///
/// The surface grammar has two competing array-index notations: a
/// digit-only arrow hop (`options->1`) and bracket groups
/// (`options->languages[0][1]`, signed). Both normalize to
/// `PathSegment::Index` here, so downstream compilers only ever see one
/// canonical representation.
pub struct Parser;

impl Parser {
    /// Parses a path string into a `JsonPath`.
    pub fn parse(path: &str) -> Result<JsonPath, JsonPathError> {
        if path.is_empty() {
            return Err(JsonPathError::InvalidSyntax {
                message: "empty path expression".to_string(),
            });
        }

        let mut chunks = path.split("->");
        let root = chunks.next().unwrap_or("");
        let (column, mut segments) = Self::parse_root(root)?;

        for chunk in chunks {
            Self::parse_hop(chunk, &mut segments)?;
        }

        Ok(JsonPath::new(column, segments))
    }

    /// Parses the root chunk: a column name, optionally followed by
    /// bracket groups (`options[0]`). The column name is taken verbatim
    /// and may be dotted (`users.options`).
    fn parse_root(chunk: &str) -> Result<(String, Vec<PathSegment>), JsonPathError> {
        let bracket_start = chunk.find('[').unwrap_or(chunk.len());
        let name = &chunk[..bracket_start];

        if name.is_empty() {
            return Err(JsonPathError::InvalidSyntax {
                message: "path must begin with a column name".to_string(),
            });
        }

        let mut segments = Vec::new();
        Self::parse_bracket_groups(&chunk[bracket_start..], &mut segments)?;

        Ok((name.to_string(), segments))
    }

    /// Parses one `->`-separated hop: `name`, `name[i][j]`, `[i]`, or a
    /// digit-only chunk that counts as an array index.
    ///
    /// A bracket-only chunk (`->[1]`) attaches directly to the previous
    /// hop without introducing a synthetic key segment.
    fn parse_hop(chunk: &str, segments: &mut Vec<PathSegment>) -> Result<(), JsonPathError> {
        if chunk.is_empty() {
            return Err(JsonPathError::InvalidSyntax {
                message: "empty path segment".to_string(),
            });
        }

        let bracket_start = chunk.find('[').unwrap_or(chunk.len());
        let name = &chunk[..bracket_start];

        if !name.is_empty() {
            match Self::parse_signed_digits(name) {
                Some((value, negative)) => segments.push(PathSegment::Index { value, negative }),
                None => segments.push(PathSegment::Key(name.to_string())),
            }
        }

        Self::parse_bracket_groups(&chunk[bracket_start..], segments)
    }

    /// Parses a run of bracket groups (`[0][-1]...`) at the end of a
    /// chunk. Anything other than a well-formed group is an error.
    fn parse_bracket_groups(
        mut rest: &str,
        segments: &mut Vec<PathSegment>,
    ) -> Result<(), JsonPathError> {
        while !rest.is_empty() {
            match rest.strip_prefix('[') {
                Some(open) => match open.find(']') {
                    Some(end) => {
                        let content = &open[..end];
                        match Self::parse_signed_digits(content) {
                            Some((value, negative)) => {
                                segments.push(PathSegment::Index { value, negative });
                            }
                            None => {
                                return Err(JsonPathError::InvalidIndex {
                                    found: content.to_string(),
                                });
                            }
                        }
                        rest = &open[end + 1..];
                    }
                    None => {
                        return Err(JsonPathError::UnexpectedEnd {
                            expected: "']'".to_string(),
                        });
                    }
                },
                None => {
                    return Err(JsonPathError::InvalidSyntax {
                        message: format!("unexpected text '{}' after bracket group", rest),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns `(magnitude, negative)` when the text is an optionally
    /// `-`-signed decimal integer, `None` otherwise.
    fn parse_signed_digits(text: &str) -> Option<(u64, bool)> {
        let (digits, negative) = match text.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (text, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        digits.parse::<u64>().ok().map(|value| (value, negative))
    }
}
