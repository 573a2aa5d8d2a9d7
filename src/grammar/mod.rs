//! PostgreSQL jsonb fragment compilers.
//!
//! This module turns parsed [`crate::jsonpath::JsonPath`] values into
//! SQL text: boolean existence predicates for `where` clauses and
//! `jsonb_set` assignment clauses for path-addressed updates. All
//! output is assembled through [`SqlEmitter`], which reads its quoting
//! and casting rules from an explicit
//! [`GrammarConfig`](crate::config::GrammarConfig).
//!
//! Compilation is pure and deterministic: the same path and settings
//! always produce byte-identical SQL, and every failure is reported
//! before any fragment text is returned.

pub mod emitter;
pub mod error;
pub mod existence;
pub mod fragment;
pub mod update;

pub use emitter::SqlEmitter;
pub use error::GrammarError;
pub use existence::ExistenceCompiler;
pub use fragment::CompiledFragment;
pub use update::UpdatePathCompiler;
