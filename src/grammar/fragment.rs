//! Compiled SQL fragments and their bound values.

use serde_json::Value;

/// An immutable piece of SQL text plus the values bound to its
/// placeholders, in placeholder order.
///
/// Constructed once per compilation and consumed immediately by the
/// caller to append to the outer statement text and binding list; never
/// mutated or reused across statements.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFragment {
    sql: String,
    bindings: Vec<Value>,
}

impl CompiledFragment {
    /// Creates a fragment from SQL text and its ordered bindings.
    pub fn new(sql: String, bindings: Vec<Value>) -> Self {
        Self { sql, bindings }
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bound values, in the order their placeholders appear.
    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    /// Consumes the fragment, returning the SQL text and bindings.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.bindings)
    }
}
