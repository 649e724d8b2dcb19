//! Grammar configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsquery/rsquery.toml`
//! 3. Environment variables: `RSQUERY_*` prefix, `__` as nesting separator
//!
//! CLI flags override the merged result last; that happens in the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Grammar, TrailingDelimiters};

/// Errors raised while loading or converting settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid delimiter pair '{0}': expected exactly two characters, opening then closing")]
    InvalidDelimiterPair(String),

    #[error("cannot write config template: {0}")]
    Write(#[from] std::io::Error),

    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no config directory available on this platform")]
    NoConfigDir,
}

/// Grammar section of the settings file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GrammarSettings {
    /// AND operator token
    pub and: String,
    /// OR operator token
    pub or: String,
    /// NOT operator token
    pub not: String,
    /// Delimiter pairs as two-character strings, opening then closing
    pub delimiters: Vec<String>,
    /// Fail on delimiters left open at end of input instead of closing them
    /// implicitly
    pub strict_close: bool,
}

impl Default for GrammarSettings {
    fn default() -> Self {
        Self {
            and: "&".to_string(),
            or: "|".to_string(),
            not: "-".to_string(),
            delimiters: vec!["()".to_string(), "\"\"".to_string()],
            strict_close: false,
        }
    }
}

/// Merged application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub grammar: GrammarSettings,
}

impl Settings {
    /// Load settings from the global config file and environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::global_config_path())
    }

    /// Load with an explicit config file path; tests use this to stay out of
    /// the real home directory.
    pub fn load_from(config_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(false));
        }
        let merged = builder
            .add_source(
                Environment::with_prefix("RSQUERY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(merged.try_deserialize()?)
    }

    /// Location of the global config file, platform dependent.
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "rsquery").map(|dirs| dirs.config_dir().join("rsquery.toml"))
    }

    /// Write a commented template with the compiled defaults.
    pub fn write_template(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = toml::to_string_pretty(&Settings::default())?;
        std::fs::write(path, format!("# rsquery configuration\n\n{body}"))?;
        Ok(())
    }

    /// Convert to a scanner grammar, splitting the two-character delimiter
    /// entries.
    pub fn to_grammar(&self) -> Result<Grammar, ConfigError> {
        let mut grammar = Grammar {
            trailing: if self.grammar.strict_close {
                TrailingDelimiters::Error
            } else {
                TrailingDelimiters::AutoClose
            },
            ..Grammar::default()
        };
        grammar.and_token = self.grammar.and.clone();
        grammar.or_token = self.grammar.or.clone();
        grammar.not_token = self.grammar.not.clone();
        grammar.delimiters.clear();
        for entry in &self.grammar.delimiters {
            let mut chars = entry.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(open), Some(close), None) => {
                    grammar.delimiters.insert(open, close);
                }
                _ => return Err(ConfigError::InvalidDelimiterPair(entry.clone())),
            }
        }
        Ok(grammar)
    }
}
