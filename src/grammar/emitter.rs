//! Shared low-level SQL emission helpers.

use crate::config::GrammarConfig;
use crate::jsonpath::PathSegment;

/// Low-level SQL text assembly, parameterized by grammar settings.
///
/// The higher-level compilers build every fragment through these
/// helpers so quoting and casting stay consistent in a single place.
pub struct SqlEmitter<'a> {
    config: &'a GrammarConfig,
}

impl<'a> SqlEmitter<'a> {
    /// Creates an emitter over the given grammar settings.
    pub fn new(config: &'a GrammarConfig) -> Self {
        Self { config }
    }

    /// The grammar settings this emitter renders with.
    pub fn config(&self) -> &GrammarConfig {
        self.config
    }

    /// Quotes a SQL identifier, handling dotted references.
    ///
    /// `users.options` becomes `"users"."options"`. Embedded quote
    /// characters are doubled.
    pub fn wrap_identifier(&self, name: &str) -> String {
        let quote = self.config.identifier_quote;
        let doubled = format!("{}{}", quote, quote);
        name.split('.')
            .map(|part| format!("{}{}{}", quote, part.replace(quote, &doubled), quote))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Quotes a SQL string literal. Embedded quote characters are
    /// doubled.
    pub fn quote_string(&self, text: &str) -> String {
        let quote = self.config.string_quote;
        let doubled = format!("{}{}", quote, quote);
        format!("{}{}{}", quote, text.replace(quote, &doubled), quote)
    }

    /// Wraps an expression in parentheses and casts it to jsonb.
    pub fn jsonb_cast(&self, expr: &str) -> String {
        format!("({}){}", expr, self.config.jsonb_cast)
    }

    /// Builds the access expression for a column and a run of path
    /// segments: `"options"->'languages'->0`.
    ///
    /// Key hops append a single-quoted literal, index hops the signed
    /// decimal value.
    pub fn access_expression(&self, column: &str, segments: &[PathSegment]) -> String {
        let mut expr = self.wrap_identifier(column);
        for segment in segments {
            match segment {
                PathSegment::Key(name) => {
                    expr.push_str("->");
                    expr.push_str(&self.quote_string(name));
                }
                PathSegment::Index { value, negative } => {
                    expr.push_str("->");
                    if *negative {
                        expr.push('-');
                    }
                    expr.push_str(&value.to_string());
                }
            }
        }
        expr
    }

    /// Wraps a nullable boolean expression so SQL NULL reads as false.
    pub fn coalesce_false(&self, expr: &str) -> String {
        format!("coalesce({}, false)", expr)
    }

    /// Builds the two-branch array-length check.
    ///
    /// `jsonb_array_length` raises on non-array values, so the type
    /// must be tested first; non-array or absent paths read as false.
    pub fn array_length_at_least(&self, access: &str, threshold: u64) -> String {
        format!(
            "case when jsonb_typeof({access}) = {array} then jsonb_array_length({access}) >= {threshold} else false end",
            access = access,
            array = self.quote_string("array"),
            threshold = threshold,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonpath::Parser;

    #[test]
    fn test_wrap_identifier_simple() {
        let config = GrammarConfig::default();
        let emitter = SqlEmitter::new(&config);
        assert_eq!(emitter.wrap_identifier("options"), "\"options\"");
    }

    #[test]
    fn test_wrap_identifier_dotted() {
        let config = GrammarConfig::default();
        let emitter = SqlEmitter::new(&config);
        assert_eq!(
            emitter.wrap_identifier("users.options"),
            "\"users\".\"options\""
        );
    }

    #[test]
    fn test_quote_string_doubles_embedded_quotes() {
        let config = GrammarConfig::default();
        let emitter = SqlEmitter::new(&config);
        assert_eq!(emitter.quote_string("it's"), "'it''s'");
    }

    #[test]
    fn test_access_expression() {
        let config = GrammarConfig::default();
        let emitter = SqlEmitter::new(&config);
        let path = Parser::parse("options->languages[0]").unwrap();
        assert_eq!(
            emitter.access_expression(&path.column, &path.segments),
            "\"options\"->'languages'->0"
        );
    }

    #[test]
    fn test_jsonb_cast() {
        let config = GrammarConfig::default();
        let emitter = SqlEmitter::new(&config);
        assert_eq!(emitter.jsonb_cast("\"options\""), "(\"options\")::jsonb");
    }
}
