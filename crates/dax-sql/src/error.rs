//! Error types for dax-sql

use thiserror::Error;

/// SQL splitting and clause-extraction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlError {
    /// Tokenizer error (S001)
    #[error("[S001] SQL syntax error at line {line}, column {column}: {message}")]
    TokenizeError {
        message: String,
        line: usize,
        column: usize,
    },

    /// Empty SQL (S002)
    #[error("[S002] SQL is empty")]
    EmptySql,

    /// Unknown tokenizer dialect name (S003)
    #[error("[S003] Unknown SQL dialect '{0}': expected generic, mssql or ansi")]
    UnknownDialect(String),

    /// Statement lacks a required clause (S004)
    #[error("[S004] Statement {statement}: {clause} clause is missing")]
    MissingClause {
        statement: usize,
        clause: &'static str,
    },

    /// Parentheses do not balance (S005)
    #[error("[S005] Statement {statement}: unbalanced parentheses ({detail})")]
    UnbalancedParentheses { statement: usize, detail: String },
}

impl SqlError {
    /// How to fix the problem, shown next to the error on validation
    pub fn suggestion(&self) -> &'static str {
        match self {
            SqlError::TokenizeError { .. } => {
                "Check for unterminated string literals or quoted identifiers"
            }
            SqlError::EmptySql => "Enter valid source code",
            SqlError::UnknownDialect(_) => "Use one of the dialects: generic, mssql, ansi",
            SqlError::MissingClause { .. } => "Add a FROM clause naming the source table",
            SqlError::UnbalancedParentheses { .. } => {
                "Check that every opening parenthesis has a matching closing parenthesis"
            }
        }
    }
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
