//! Abstract syntax tree types for jsonb path expressions.

use std::fmt;

/// A single hop in a jsonb path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named key (`->name`)
    Key(String),
    /// Array index (`[0]`, `[-1]`, or a bare digit hop like `->2`).
    ///
    /// `value` is the magnitude; `negative` records whether the literal
    /// token carried a leading `-`. A negative index never participates
    /// in positional access; it only changes the length threshold when
    /// it is the final segment of an existence test.
    Index { value: u64, negative: bool },
}

impl PathSegment {
    /// Creates a key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates an index segment from a signed value.
    pub fn index(value: i64) -> Self {
        PathSegment::Index {
            value: value.unsigned_abs(),
            negative: value < 0,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "->{}", name),
            PathSegment::Index { value, negative } => {
                if *negative {
                    write!(f, "[-{}]", value)
                } else {
                    write!(f, "[{}]", value)
                }
            }
        }
    }
}

/// A complete jsonb path expression: a root column plus the hops into
/// the document stored in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    /// Root column name, taken verbatim from the text before the first
    /// separator. May be dotted (`users.options`).
    pub column: String,
    /// Hops into the JSON document. Empty for a bare column reference.
    pub segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates a new path from a column name and segments.
    pub fn new(column: impl Into<String>, segments: Vec<PathSegment>) -> Self {
        Self {
            column: column.into(),
            segments,
        }
    }

    /// Splits the segments into (prefix, final segment).
    ///
    /// The final segment determines the shape of the generated SQL: a
    /// key tests existence with the jsonb key operator, an index with an
    /// array-length comparison. An empty sequence yields `None` and the
    /// path degenerates to the column itself.
    pub fn split_last(&self) -> (&[PathSegment], Option<&PathSegment>) {
        match self.segments.split_last() {
            Some((last, prefix)) => (prefix, Some(last)),
            None => (&[], None),
        }
    }

    /// True when the path is a bare column reference with no hops.
    pub fn is_bare(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for JsonPath {
    /// Renders the canonical path-string form. Re-parsing the rendered
    /// string reproduces an equivalent segment sequence.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)?;
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
