//! Key/array-slot existence predicate compilation.

use crate::config::GrammarConfig;
use crate::jsonpath::{JsonPath, PathSegment};

use super::emitter::SqlEmitter;
use super::error::GrammarError;

/// Compiles a jsonb path into a boolean SQL predicate testing whether
/// the addressed key or array slot exists.
///
/// The shape of the predicate depends on the final segment:
///
/// - final key: `coalesce((<access>)::jsonb ?? 'key', false)`, the
///   jsonb existence operator with SQL NULL folded to false so the
///   predicate composes in a `where` clause without three-valued-logic
///   surprises.
/// - final index: a `case when jsonb_typeof(...) = 'array'` guard
///   around a `jsonb_array_length` comparison. Index `i` requires at
///   least `i + 1` elements; a negative index `-n` requires at least
///   `n`.
pub struct ExistenceCompiler<'a> {
    emitter: SqlEmitter<'a>,
}

impl<'a> ExistenceCompiler<'a> {
    /// Creates a compiler over the given grammar settings.
    pub fn new(config: &'a GrammarConfig) -> Self {
        Self {
            emitter: SqlEmitter::new(config),
        }
    }

    /// Compiles the "path exists" predicate.
    ///
    /// Fails with [`GrammarError::EmptyPath`] on a bare column: there is
    /// no key or slot to test.
    pub fn compile(&self, path: &JsonPath) -> Result<String, GrammarError> {
        let (prefix, last) = path.split_last();
        let last = match last {
            Some(segment) => segment,
            None => {
                return Err(GrammarError::EmptyPath {
                    column: path.column.clone(),
                })
            }
        };

        let access = self
            .emitter
            .jsonb_cast(&self.emitter.access_expression(&path.column, prefix));

        let predicate = match last {
            PathSegment::Key(name) => self.emitter.coalesce_false(&format!(
                "{} {} {}",
                access,
                self.emitter.config().key_exists_operator,
                self.emitter.quote_string(name)
            )),
            PathSegment::Index { value, negative } => {
                let threshold = if *negative { *value } else { *value + 1 };
                self.emitter.array_length_at_least(&access, threshold)
            }
        };

        Ok(predicate)
    }

    /// Compiles the "path does not exist" predicate: the existence
    /// predicate negated with a leading `not`.
    pub fn compile_negated(&self, path: &JsonPath) -> Result<String, GrammarError> {
        Ok(format!("not {}", self.compile(path)?))
    }
}
