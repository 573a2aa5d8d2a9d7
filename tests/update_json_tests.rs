//! Integration tests for path-addressed jsonb update statements.

use pgquill::builder::Builder;
use pgquill::grammar::GrammarError;
use serde_json::json;

/// Test the full update statement: one jsonb_set assignment per
/// column in first-seen order, a JSON-boolean where inlined with no
/// binding, and JSON-encoded update values bound in placeholder order.
#[test]
fn test_update_wrapping_json_path_array_index() {
    let mut builder = Builder::default();
    builder.from("users");
    builder.where_clause("options->[1]->2fa", "=", true).unwrap();

    let fragment = builder
        .update([
            ("options->[1]->2fa", json!(false)),
            ("meta->tags[0][2]", json!("large")),
        ])
        .unwrap();

    assert_eq!(
        fragment.sql(),
        "update \"users\" set \"options\" = jsonb_set(\"options\"::jsonb, '{1,\"2fa\"}', ?), \"meta\" = jsonb_set(\"meta\"::jsonb, '{\"tags\",0,2}', ?) where (\"options\"->1->'2fa')::jsonb = 'true'::jsonb"
    );
    assert_eq!(fragment.bindings(), [json!("false"), json!("\"large\"")]);
}

/// Test that several paths into the same column chain jsonb_set calls
/// in the order the caller supplied them.
#[test]
fn test_update_same_column_chains() {
    let mut builder = Builder::default();
    builder.from("users");

    let fragment = builder
        .update([
            ("options->language", json!("en")),
            ("options->flags[0]", json!(true)),
        ])
        .unwrap();

    assert_eq!(
        fragment.sql(),
        "update \"users\" set \"options\" = jsonb_set(jsonb_set(\"options\"::jsonb, '{\"language\"}', ?), '{\"flags\",0}', ?)"
    );
    assert_eq!(fragment.bindings(), [json!("\"en\""), json!("true")]);
}

/// Test that an entry with no path segments replaces the whole column
/// with the raw value bound.
#[test]
fn test_update_bare_column_is_plain_assignment() {
    let mut builder = Builder::default();
    builder.from("users");

    let fragment = builder.update([("name", json!("Alice"))]).unwrap();

    assert_eq!(fragment.sql(), "update \"users\" set \"name\" = ?");
    assert_eq!(fragment.bindings(), [json!("Alice")]);
}

/// Test that where-clause bindings follow the update bindings.
#[test]
fn test_update_binding_order() {
    let mut builder = Builder::default();
    builder.from("users");
    builder.where_clause("id", "=", 7).unwrap();

    let fragment = builder
        .update([("options->language", json!("en"))])
        .unwrap();

    assert_eq!(
        fragment.sql(),
        "update \"users\" set \"options\" = jsonb_set(\"options\"::jsonb, '{\"language\"}', ?) where \"id\" = ?"
    );
    assert_eq!(fragment.bindings(), [json!("\"en\""), json!(7)]);
}

/// Test that a negative index in an update path is rejected rather
/// than silently normalized.
#[test]
fn test_update_rejects_negative_index() {
    let mut builder = Builder::default();
    builder.from("users");

    let err = builder
        .update([("options->languages[-1]", json!("en"))])
        .unwrap_err();

    assert_eq!(err, GrammarError::NegativeIndex { magnitude: 1 });
}

/// Test that rendering an update with no table set fails instead of
/// emitting a half-built statement.
#[test]
fn test_update_without_table_fails() {
    let builder = Builder::default();
    let err = builder
        .update([("options->language", json!("en"))])
        .unwrap_err();
    assert_eq!(err, GrammarError::MissingTable);
}

/// Test that a malformed path aborts the whole update with no partial
/// SQL.
#[test]
fn test_update_propagates_path_errors() {
    let mut builder = Builder::default();
    builder.from("users");

    assert!(builder
        .update([("options->languages[0", json!("en"))])
        .is_err());
}
