//! Grammar configuration for pgquill.
//!
//! This module provides the dialect-specific grammar settings with
//! sensible PostgreSQL defaults and support for serialization and
//! deserialization via serde. Configuration can be loaded from TOML
//! files; the compilers take it as an explicit value rather than
//! reading ambient state, so alternate JSON-capable dialects can be
//! targeted without touching the compiler code.
//!
//! # Example
//!
//! ```
//! use pgquill::config::GrammarConfig;
//!
//! // Use default PostgreSQL settings
//! let config = GrammarConfig::default();
//! assert_eq!(config.jsonb_cast, "::jsonb");
//!
//! // Create custom settings
//! let custom = GrammarConfig {
//!     key_exists_operator: "?".to_string(),
//!     ..GrammarConfig::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

/// Dialect-specific grammar settings for the jsonb fragment compilers.
///
/// # Fields
///
/// * `identifier_quote` - Quote character for SQL identifiers (default: `"`)
/// * `string_quote` - Quote character for SQL string literals (default: `'`)
/// * `jsonb_cast` - Cast suffix applied to JSON access expressions (default: `::jsonb`)
/// * `key_exists_operator` - jsonb key-existence operator (default: `??`)
///
/// The default existence operator is the doubled `??` form: drivers
/// that use `?` as the placeholder character require the jsonb operator
/// to be escaped this way. Set it to `?` for drivers with named or
/// numbered placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarConfig {
    /// Quote character for SQL identifiers
    #[serde(default = "default_identifier_quote")]
    pub identifier_quote: char,

    /// Quote character for SQL string literals
    #[serde(default = "default_string_quote")]
    pub string_quote: char,

    /// Cast suffix applied to JSON access expressions
    #[serde(default = "default_jsonb_cast")]
    pub jsonb_cast: String,

    /// jsonb key-existence operator
    #[serde(default = "default_key_exists_operator")]
    pub key_exists_operator: String,
}

/// Returns the default identifier quote character.
fn default_identifier_quote() -> char {
    '"'
}

/// Returns the default string quote character.
fn default_string_quote() -> char {
    '\''
}

/// Returns the default jsonb cast suffix.
fn default_jsonb_cast() -> String {
    "::jsonb".to_string()
}

/// Returns the default key-existence operator.
fn default_key_exists_operator() -> String {
    "??".to_string()
}

impl Default for GrammarConfig {
    /// Creates the PostgreSQL default grammar settings.
    fn default() -> Self {
        Self {
            identifier_quote: default_identifier_quote(),
            string_quote: default_string_quote(),
            jsonb_cast: default_jsonb_cast(),
            key_exists_operator: default_key_exists_operator(),
        }
    }
}

impl GrammarConfig {
    /// Returns the path to the user-level config file.
    ///
    /// Uses `~/.config/pgquill/grammar.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("pgquill");
            path.push("grammar.toml");
            path
        })
    }

    /// Loads the grammar settings from the user-level config file.
    ///
    /// Returns the defaults if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|_| Self::default()),
            Err(_) => Self::default(),
        }
    }

    /// Loads grammar settings from a specific TOML file.
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Saves the grammar settings to the user-level config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, toml_string)?;

        Ok(())
    }
}
