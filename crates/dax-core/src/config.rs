//! Converter configuration, optionally loaded from a YAML file

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by both converters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConverterConfig {
    /// Table used when the source names none (Spotfire never does)
    #[serde(default = "default_table")]
    pub default_table: String,

    /// Tokenizer dialect for splitting SQL statements
    #[serde(default)]
    pub sql_dialect: TokenizerDialect,
}

/// SQL tokenizer dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerDialect {
    /// Permissive generic SQL
    #[default]
    Generic,
    /// T-SQL, which also accepts `[bracketed]` identifiers
    MsSql,
    /// Strict ANSI SQL
    Ansi,
}

impl std::fmt::Display for TokenizerDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenizerDialect::Generic => write!(f, "generic"),
            TokenizerDialect::MsSql => write!(f, "mssql"),
            TokenizerDialect::Ansi => write!(f, "ansi"),
        }
    }
}

fn default_table() -> String {
    "Table".to_string()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            default_table: default_table(),
            sql_dialect: TokenizerDialect::default(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ConverterConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the default table name
    pub fn with_default_table(mut self, table: impl Into<String>) -> CoreResult<Self> {
        self.default_table = table.into();
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.default_table.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "default_table cannot be empty".to_string(),
            });
        }
        if self.default_table.contains(['[', ']']) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "default_table '{}' cannot contain square brackets",
                    self.default_table
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
