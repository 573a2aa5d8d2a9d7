//! Minimal fluent query builder over the jsonb grammar.
//!
//! This module provides just enough of a query-builder facade to
//! render complete statements around the compiled jsonb fragments:
//! `select`/`from`, basic `where`/`or where` with `?` placeholders,
//! JSON-boolean comparisons, the `whereJsonContainsKey` family, and
//! path-addressed `update` statements. Joins, ordering, grouping, and
//! the connection layer are deliberately absent.
//!
//! # Example
//!
//! ```
//! use pgquill::builder::Builder;
//!
//! let mut builder = Builder::default();
//! builder.from("users");
//! builder.where_json_contains_key("options->languages").unwrap();
//! assert_eq!(
//!     builder.to_sql().unwrap(),
//!     "select * from \"users\" where coalesce((\"options\")::jsonb ?? 'languages', false)"
//! );
//! ```

use serde_json::Value;

use crate::config::GrammarConfig;
use crate::grammar::{
    CompiledFragment, ExistenceCompiler, GrammarError, SqlEmitter, UpdatePathCompiler,
};
use crate::jsonpath::{JsonPath, Parser};

/// How a where clause joins the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conjunction {
    And,
    Or,
}

impl Conjunction {
    fn as_str(self) -> &'static str {
        match self {
            Conjunction::And => "and",
            Conjunction::Or => "or",
        }
    }
}

/// One parsed where clause awaiting rendering.
#[derive(Debug, Clone)]
enum Predicate {
    /// `"col" <op> ?` with the value bound.
    Basic { column: String, operator: String },
    /// `(<access>)::jsonb <op> '<json>'::jsonb`, value inlined.
    JsonBoolean {
        path: JsonPath,
        operator: String,
        value: bool,
    },
    /// `(<access>)::jsonb <op> ?` with the JSON-encoded value bound.
    JsonValue { path: JsonPath, operator: String },
    /// Key/array-slot existence predicate, optionally negated.
    ContainsKey { path: JsonPath, negated: bool },
}

#[derive(Debug, Clone)]
struct WhereEntry {
    conjunction: Conjunction,
    predicate: Predicate,
}

/// Fluent builder assembling `select` and `update` statements around
/// the jsonb fragment compilers.
///
/// Path-accepting methods tokenize their argument up front and
/// propagate syntax errors immediately; no partial SQL is ever
/// emitted.
#[derive(Debug, Clone)]
pub struct Builder {
    config: GrammarConfig,
    table: Option<String>,
    columns: Vec<String>,
    wheres: Vec<WhereEntry>,
    bindings: Vec<Value>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(GrammarConfig::default())
    }
}

impl Builder {
    /// Creates a builder rendering with the given grammar settings.
    pub fn new(config: GrammarConfig) -> Self {
        Self {
            config,
            table: None,
            columns: Vec::new(),
            wheres: Vec::new(),
            bindings: Vec::new(),
        }
    }

    /// Sets the columns for the select list. Defaults to `*`.
    pub fn select<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the target table.
    pub fn from(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    /// Adds an `and`-joined where clause.
    ///
    /// A plain column renders `"col" <op> ?` and binds the value. A
    /// JSON path column compares the jsonb access expression: boolean
    /// values are inlined as `'true'::jsonb`/`'false'::jsonb` with no
    /// binding, anything else binds its JSON encoding.
    pub fn where_clause(
        &mut self,
        column: &str,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, GrammarError> {
        self.add_where(Conjunction::And, column, operator, value.into())
    }

    /// Adds an `or`-joined where clause.
    pub fn or_where(
        &mut self,
        column: &str,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, GrammarError> {
        self.add_where(Conjunction::Or, column, operator, value.into())
    }

    /// Adds an `and`-joined predicate testing that the path's key or
    /// array slot exists.
    pub fn where_json_contains_key(&mut self, path: &str) -> Result<&mut Self, GrammarError> {
        self.add_contains_key(Conjunction::And, path, false)
    }

    /// Adds an `or`-joined key-existence predicate.
    pub fn or_where_json_contains_key(&mut self, path: &str) -> Result<&mut Self, GrammarError> {
        self.add_contains_key(Conjunction::Or, path, false)
    }

    /// Adds an `and`-joined predicate testing that the path's key or
    /// array slot does not exist.
    pub fn where_json_doesnt_contain_key(
        &mut self,
        path: &str,
    ) -> Result<&mut Self, GrammarError> {
        self.add_contains_key(Conjunction::And, path, true)
    }

    /// Adds an `or`-joined negated key-existence predicate.
    pub fn or_where_json_doesnt_contain_key(
        &mut self,
        path: &str,
    ) -> Result<&mut Self, GrammarError> {
        self.add_contains_key(Conjunction::Or, path, true)
    }

    /// The values bound by the accumulated where clauses, in
    /// placeholder order.
    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    /// Renders the select statement.
    pub fn to_sql(&self) -> Result<String, GrammarError> {
        let emitter = SqlEmitter::new(&self.config);

        let mut sql = format!("select {}", self.render_columns(&emitter));
        if let Some(table) = &self.table {
            sql.push_str(" from ");
            sql.push_str(&emitter.wrap_identifier(table));
        }

        let wheres = self.compile_wheres(&emitter)?;
        if !wheres.is_empty() {
            sql.push(' ');
            sql.push_str(&wheres);
        }

        Ok(sql)
    }

    /// Renders a complete `update ... set ... where ...` statement from
    /// an ordered map of path strings to new values.
    ///
    /// Exactly one assignment is produced per distinct root column, in
    /// first-seen order. Bindings are the JSON-encoded update values in
    /// `jsonb_set` order, followed by any where-clause bindings.
    pub fn update<'a, I>(&self, entries: I) -> Result<CompiledFragment, GrammarError>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let table = self.table.as_deref().ok_or(GrammarError::MissingTable)?;
        let emitter = SqlEmitter::new(&self.config);

        let mut parsed = Vec::new();
        for (path_str, value) in entries {
            let path = Parser::parse(path_str)?;
            let bound = if path.is_bare() {
                value
            } else {
                Value::String(value.to_string())
            };
            parsed.push((path, bound));
        }

        let compiler = UpdatePathCompiler::new(&self.config);
        let (set_sql, mut bindings) = compiler.compile_assignments(parsed)?.into_parts();

        let mut sql = format!("update {} set {}", emitter.wrap_identifier(table), set_sql);
        let wheres = self.compile_wheres(&emitter)?;
        if !wheres.is_empty() {
            sql.push(' ');
            sql.push_str(&wheres);
        }

        bindings.extend(self.bindings.iter().cloned());
        Ok(CompiledFragment::new(sql, bindings))
    }

    fn add_where(
        &mut self,
        conjunction: Conjunction,
        column: &str,
        operator: &str,
        value: Value,
    ) -> Result<&mut Self, GrammarError> {
        let predicate = if column.contains("->") || column.contains('[') {
            let path = Parser::parse(column)?;
            match value {
                Value::Bool(flag) => Predicate::JsonBoolean {
                    path,
                    operator: operator.to_string(),
                    value: flag,
                },
                other => {
                    self.bindings.push(Value::String(other.to_string()));
                    Predicate::JsonValue {
                        path,
                        operator: operator.to_string(),
                    }
                }
            }
        } else {
            self.bindings.push(value);
            Predicate::Basic {
                column: column.to_string(),
                operator: operator.to_string(),
            }
        };

        self.wheres.push(WhereEntry {
            conjunction,
            predicate,
        });
        Ok(self)
    }

    fn add_contains_key(
        &mut self,
        conjunction: Conjunction,
        path: &str,
        negated: bool,
    ) -> Result<&mut Self, GrammarError> {
        let path = Parser::parse(path)?;
        if path.is_bare() {
            return Err(GrammarError::EmptyPath { column: path.column });
        }

        self.wheres.push(WhereEntry {
            conjunction,
            predicate: Predicate::ContainsKey { path, negated },
        });
        Ok(self)
    }

    fn render_columns(&self, emitter: &SqlEmitter<'_>) -> String {
        if self.columns.is_empty() {
            return "*".to_string();
        }
        self.columns
            .iter()
            .map(|column| {
                if column == "*" {
                    column.clone()
                } else {
                    emitter.wrap_identifier(column)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn compile_wheres(&self, emitter: &SqlEmitter<'_>) -> Result<String, GrammarError> {
        if self.wheres.is_empty() {
            return Ok(String::new());
        }

        let existence = ExistenceCompiler::new(&self.config);
        let mut out = String::from("where ");
        for (i, entry) in self.wheres.iter().enumerate() {
            if i > 0 {
                out.push(' ');
                out.push_str(entry.conjunction.as_str());
                out.push(' ');
            }
            out.push_str(&self.render_predicate(&entry.predicate, emitter, &existence)?);
        }
        Ok(out)
    }

    fn render_predicate(
        &self,
        predicate: &Predicate,
        emitter: &SqlEmitter<'_>,
        existence: &ExistenceCompiler<'_>,
    ) -> Result<String, GrammarError> {
        let rendered = match predicate {
            Predicate::Basic { column, operator } => {
                format!("{} {} ?", emitter.wrap_identifier(column), operator)
            }
            Predicate::JsonBoolean {
                path,
                operator,
                value,
            } => {
                let access =
                    emitter.jsonb_cast(&emitter.access_expression(&path.column, &path.segments));
                let literal = emitter.quote_string(if *value { "true" } else { "false" });
                format!(
                    "{} {} {}{}",
                    access, operator, literal, self.config.jsonb_cast
                )
            }
            Predicate::JsonValue { path, operator } => {
                let access =
                    emitter.jsonb_cast(&emitter.access_expression(&path.column, &path.segments));
                format!("{} {} ?", access, operator)
            }
            Predicate::ContainsKey { path, negated } => {
                if *negated {
                    existence.compile_negated(path)?
                } else {
                    existence.compile(path)?
                }
            }
        };
        Ok(rendered)
    }
}
