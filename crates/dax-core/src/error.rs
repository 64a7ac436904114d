//! Error types for dax-core

use thiserror::Error;

/// Core error type for daxconv
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Unknown source dialect name
    #[error("[E004] Unknown dialect '{0}': expected 'sql' or 'spotfire'")]
    UnknownDialect(String),

    /// E005: IO error with file path context
    #[error("[E005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E006: A NULL-handling rule failed to compile
    #[error("[E006] Invalid rewrite rule '{pattern}': {message}")]
    InvalidRewriteRule { pattern: String, message: String },
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Faults raised while generating DAX from a parsed unit.
///
/// Generators only fail when the unit they are handed is internally
/// inconsistent; unsupported constructs become comment placeholders instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// G001: Statement carries contradictory or missing fields
    #[error("[G001] Malformed statement #{index}: {reason}")]
    MalformedStatement { index: usize, reason: String },

    /// G002: Expression carries contradictory or missing fields
    #[error("[G002] Malformed expression #{index}: {reason}")]
    MalformedExpression { index: usize, reason: String },
}

/// Result type alias for GenerateError
pub type GenerateResult<T> = Result<T, GenerateError>;
