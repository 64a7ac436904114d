//! Source dialect selector

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The source languages a conversion can start from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceDialect {
    /// SQL-like query language
    Sql,
    /// Spotfire custom expression language
    Spotfire,
}

impl fmt::Display for SourceDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDialect::Sql => write!(f, "SQL"),
            SourceDialect::Spotfire => write!(f, "Spotfire"),
        }
    }
}

impl FromStr for SourceDialect {
    type Err = CoreError;

    /// Accepts the dialect name or its conversion type, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sql" | "sql_to_dax" => Ok(SourceDialect::Sql),
            "spotfire" | "spotfire_to_dax" => Ok(SourceDialect::Spotfire),
            _ => Err(CoreError::UnknownDialect(s.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
