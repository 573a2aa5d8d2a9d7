//! Path-addressed jsonb update compilation.

use indexmap::IndexMap;
use serde_json::Value;

use crate::config::GrammarConfig;
use crate::jsonpath::{JsonPath, PathSegment};

use super::emitter::SqlEmitter;
use super::error::GrammarError;
use super::fragment::CompiledFragment;

/// How a single column is assigned by an update map.
enum ColumnPlan {
    /// Whole-column replacement: `"col" = ?`.
    Plain(Value),
    /// One or more `jsonb_set` calls chained over the column, each a
    /// (path-array literal, bound value) pair in caller order.
    JsonSets(Vec<(String, Value)>),
}

/// Compiles path-addressed updates into `jsonb_set` assignment clauses.
///
/// Each path renders to a PostgreSQL path-array literal (the second
/// argument of `jsonb_set`); multiple paths into the same column chain,
/// so later entries see the result of earlier calls. Update paths are
/// magnitude-only: a negative index is rejected rather than silently
/// normalized.
pub struct UpdatePathCompiler<'a> {
    emitter: SqlEmitter<'a>,
}

impl<'a> UpdatePathCompiler<'a> {
    /// Creates a compiler over the given grammar settings.
    pub fn new(config: &'a GrammarConfig) -> Self {
        Self {
            emitter: SqlEmitter::new(config),
        }
    }

    /// Renders path segments into a PostgreSQL path-array literal,
    /// e.g. `'{1,"2fa"}'`.
    ///
    /// Keys are always double-quoted so they cannot be mistaken for
    /// numeric components; indices render as bare magnitude digits.
    pub fn path_array_literal(&self, segments: &[PathSegment]) -> Result<String, GrammarError> {
        let mut components = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                PathSegment::Key(name) => {
                    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
                    components.push(format!("\"{}\"", escaped));
                }
                PathSegment::Index { value, negative } => {
                    if *negative {
                        return Err(GrammarError::NegativeIndex { magnitude: *value });
                    }
                    components.push(value.to_string());
                }
            }
        }
        Ok(self
            .emitter
            .quote_string(&format!("{{{}}}", components.join(","))))
    }

    /// Compiles an ordered update map into a single `set`-clause
    /// fragment.
    ///
    /// Exactly one assignment is produced per distinct root column, in
    /// first-seen order; bindings are emitted in the order their
    /// placeholders appear left to right. Values for path-addressed
    /// entries must already be JSON-encoded by the caller; this
    /// compiler only positions them. An entry with no segments becomes
    /// a whole-column assignment with the value bound as-is.
    pub fn compile_assignments(
        &self,
        entries: Vec<(JsonPath, Value)>,
    ) -> Result<CompiledFragment, GrammarError> {
        let mut plans: IndexMap<String, ColumnPlan> = IndexMap::new();

        for (path, value) in entries {
            if path.is_bare() {
                plans.insert(path.column, ColumnPlan::Plain(value));
                continue;
            }

            let literal = self.path_array_literal(&path.segments)?;
            match plans
                .entry(path.column)
                .or_insert_with(|| ColumnPlan::JsonSets(Vec::new()))
            {
                ColumnPlan::JsonSets(sets) => sets.push((literal, value)),
                plan => *plan = ColumnPlan::JsonSets(vec![(literal, value)]),
            }
        }

        let mut assignments = Vec::with_capacity(plans.len());
        let mut bindings = Vec::new();

        for (column, plan) in plans {
            let target = self.emitter.wrap_identifier(&column);
            match plan {
                ColumnPlan::Plain(value) => {
                    assignments.push(format!("{} = ?", target));
                    bindings.push(value);
                }
                ColumnPlan::JsonSets(sets) => {
                    let mut expr = format!("{}{}", target, self.emitter.config().jsonb_cast);
                    for (literal, value) in sets {
                        expr = format!("jsonb_set({}, {}, ?)", expr, literal);
                        bindings.push(value);
                    }
                    assignments.push(format!("{} = {}", target, expr));
                }
            }
        }

        Ok(CompiledFragment::new(assignments.join(", "), bindings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonpath::Parser;
    use serde_json::json;

    fn compiler_fixture() -> GrammarConfig {
        GrammarConfig::default()
    }

    #[test]
    fn test_path_array_literal_mixed() {
        let config = compiler_fixture();
        let compiler = UpdatePathCompiler::new(&config);
        let path = Parser::parse("options->[1]->2fa").unwrap();
        assert_eq!(
            compiler.path_array_literal(&path.segments).unwrap(),
            "'{1,\"2fa\"}'"
        );
    }

    #[test]
    fn test_path_array_literal_key_then_indices() {
        let config = compiler_fixture();
        let compiler = UpdatePathCompiler::new(&config);
        let path = Parser::parse("meta->tags[0][2]").unwrap();
        assert_eq!(
            compiler.path_array_literal(&path.segments).unwrap(),
            "'{\"tags\",0,2}'"
        );
    }

    #[test]
    fn test_path_array_literal_rejects_negative_index() {
        let config = compiler_fixture();
        let compiler = UpdatePathCompiler::new(&config);
        let path = Parser::parse("meta->tags[-1]").unwrap();
        assert_eq!(
            compiler.path_array_literal(&path.segments).unwrap_err(),
            GrammarError::NegativeIndex { magnitude: 1 }
        );
    }

    #[test]
    fn test_single_assignment() {
        let config = compiler_fixture();
        let compiler = UpdatePathCompiler::new(&config);
        let path = Parser::parse("options->[1]->2fa").unwrap();
        let fragment = compiler
            .compile_assignments(vec![(path, json!("false"))])
            .unwrap();
        assert_eq!(
            fragment.sql(),
            "\"options\" = jsonb_set(\"options\"::jsonb, '{1,\"2fa\"}', ?)"
        );
        assert_eq!(fragment.bindings(), [json!("false")]);
    }

    #[test]
    fn test_same_column_chains_in_caller_order() {
        let config = compiler_fixture();
        let compiler = UpdatePathCompiler::new(&config);
        let first = Parser::parse("options->a").unwrap();
        let second = Parser::parse("options->b[0]").unwrap();
        let fragment = compiler
            .compile_assignments(vec![(first, json!("1")), (second, json!("2"))])
            .unwrap();
        assert_eq!(
            fragment.sql(),
            "\"options\" = jsonb_set(jsonb_set(\"options\"::jsonb, '{\"a\"}', ?), '{\"b\",0}', ?)"
        );
        assert_eq!(fragment.bindings(), [json!("1"), json!("2")]);
    }

    #[test]
    fn test_columns_render_in_first_seen_order() {
        let config = compiler_fixture();
        let compiler = UpdatePathCompiler::new(&config);
        let fragment = compiler
            .compile_assignments(vec![
                (Parser::parse("options->[1]->2fa").unwrap(), json!("false")),
                (Parser::parse("meta->tags[0][2]").unwrap(), json!("\"large\"")),
            ])
            .unwrap();
        assert_eq!(
            fragment.sql(),
            "\"options\" = jsonb_set(\"options\"::jsonb, '{1,\"2fa\"}', ?), \
             \"meta\" = jsonb_set(\"meta\"::jsonb, '{\"tags\",0,2}', ?)"
        );
        assert_eq!(fragment.bindings(), [json!("false"), json!("\"large\"")]);
    }

    #[test]
    fn test_bare_column_is_plain_assignment() {
        let config = compiler_fixture();
        let compiler = UpdatePathCompiler::new(&config);
        let fragment = compiler
            .compile_assignments(vec![(Parser::parse("name").unwrap(), json!("Alice"))])
            .unwrap();
        assert_eq!(fragment.sql(), "\"name\" = ?");
        assert_eq!(fragment.bindings(), [json!("Alice")]);
    }
}
