use anyhow::{Context, Result};
use clap::{Parser as CliParser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use pgquill::config::GrammarConfig;
use pgquill::grammar::{ExistenceCompiler, UpdatePathCompiler};
use pgquill::jsonpath::Parser;

/// PGQuill - inspect the SQL compiled from jsonb path expressions
#[derive(CliParser)]
#[command(name = "pgquill")]
#[command(version)]
#[command(about = "Compile jsonb path expressions into PostgreSQL SQL fragments", long_about = None)]
struct Cli {
    /// Grammar settings TOML file (defaults to ~/.config/pgquill/grammar.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the existence predicate for a path
    Contains {
        /// Path expression, e.g. options->languages[0]
        path: String,

        /// Negate the predicate
        #[arg(long)]
        not: bool,
    },
    /// Print the jsonb_set assignment clause for path=value pairs
    Set {
        /// Assignments as <path>=<json>, e.g. options->[1]->2fa=false
        #[arg(required = true)]
        assignments: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GrammarConfig::from_file(path)
            .with_context(|| format!("Failed to load grammar config from {}", path.display()))?,
        None => GrammarConfig::load(),
    };

    match cli.command {
        Command::Contains { path, not } => {
            let parsed =
                Parser::parse(&path).with_context(|| format!("Failed to parse path '{}'", path))?;
            let compiler = ExistenceCompiler::new(&config);
            let predicate = if not {
                compiler.compile_negated(&parsed)?
            } else {
                compiler.compile(&parsed)?
            };
            println!("{}", predicate);
        }
        Command::Set { assignments } => {
            let mut entries = Vec::new();
            for assignment in &assignments {
                let (path, raw) = assignment.split_once('=').ok_or_else(|| {
                    anyhow::anyhow!("Expected <path>=<json>, got '{}'", assignment)
                })?;
                let value: Value = serde_json::from_str(raw)
                    .with_context(|| format!("Invalid JSON value '{}'", raw))?;
                let parsed = Parser::parse(path)
                    .with_context(|| format!("Failed to parse path '{}'", path))?;

                // Path-addressed values bind as their JSON encoding;
                // whole-column values bind as-is.
                let bound = if parsed.is_bare() {
                    value
                } else {
                    Value::String(value.to_string())
                };
                entries.push((parsed, bound));
            }

            let compiler = UpdatePathCompiler::new(&config);
            let fragment = compiler.compile_assignments(entries)?;
            println!("{}", fragment.sql());
            for binding in fragment.bindings() {
                println!("-- binding: {}", binding);
            }
        }
    }

    Ok(())
}
