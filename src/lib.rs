//! PGQuill - a PostgreSQL jsonb path compiler.
//!
//! PGQuill turns the `->`/bracket path notation used to address nested
//! locations inside JSON(B) columns (`options->languages[0][1]`,
//! `options->[1]->2fa`) into PostgreSQL SQL fragments: boolean
//! existence predicates for `where` clauses and `jsonb_set` assignment
//! clauses for path-addressed updates.
//!
//! The pipeline is one-way: a raw path string is tokenized by
//! [`jsonpath::Parser`] into a canonical [`jsonpath::JsonPath`], which
//! the compilers in [`grammar`] render into SQL text using the quoting
//! and casting rules of an explicit [`config::GrammarConfig`]. The
//! small fluent facade in [`builder`] assembles complete statements
//! around the compiled fragments.
//!
//! Compilation is pure, synchronous, and deterministic; it allocates
//! only locally and is safe to run concurrently without coordination.
//!
//! # Example
//!
//! ```
//! use pgquill::config::GrammarConfig;
//! use pgquill::grammar::ExistenceCompiler;
//! use pgquill::jsonpath::Parser;
//!
//! let config = GrammarConfig::default();
//! let compiler = ExistenceCompiler::new(&config);
//! let path = Parser::parse("options->language->primary").unwrap();
//! assert_eq!(
//!     compiler.compile(&path).unwrap(),
//!     "coalesce((\"options\"->'language')::jsonb ?? 'primary', false)"
//! );
//! ```

pub mod builder;
pub mod config;
pub mod grammar;
pub mod jsonpath;
