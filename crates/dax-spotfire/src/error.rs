//! Error types for dax-spotfire

use thiserror::Error;

/// Structural problems found while splitting and classifying expressions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpotfireError {
    /// Expression never closes its parentheses (SF001)
    #[error("[SF001] Expression starting at line {line} has {depth} unclosed parenthesis(es)")]
    UnclosedParentheses { line: usize, depth: i32 },

    /// Closing parenthesis without an opener (SF002)
    #[error("[SF002] Unexpected ')' in expression starting at line {line}")]
    UnexpectedClose { line: usize },

    /// If/Case expression with the wrong shape (SF003)
    #[error("[SF003] Expression {expression}: malformed conditional ({reason})")]
    MalformedConditional { expression: usize, reason: String },
}

impl SpotfireError {
    /// How to fix the problem, shown next to the error on validation
    pub fn suggestion(&self) -> &'static str {
        match self {
            SpotfireError::UnclosedParentheses { .. } | SpotfireError::UnexpectedClose { .. } => {
                "Check that every opening parenthesis has a matching closing parenthesis"
            }
            SpotfireError::MalformedConditional { .. } => {
                "Use If(condition, then, else) or Case When ... Then ... [Else ...] End"
            }
        }
    }
}

/// Result type alias for SpotfireError
pub type SpotfireResult<T> = Result<T, SpotfireError>;
