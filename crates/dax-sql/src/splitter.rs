//! Split a SQL script into statement texts.
//!
//! Statements end at a `;` outside parentheses. Splitting runs on sqlparser
//! tokens so semicolons inside literals, quoted identifiers and comments
//! never split; comments themselves are dropped from the statement text.

use dax_core::text::split_top_level;
use sqlparser::tokenizer::{Token, Whitespace};

use crate::dialect::SqlDialect;
use crate::error::SqlError;

/// Statement texts in source order, plus the tokenizer error if the script
/// could not be tokenized (the split then falls back to a literal-aware
/// scan of the raw text).
pub struct SplitStatements {
    pub statements: Vec<String>,
    pub error: Option<SqlError>,
}

/// Split `sql` into trimmed, non-empty statements
pub fn split_statements(dialect: &dyn SqlDialect, sql: &str) -> SplitStatements {
    match dialect.tokenize(sql) {
        Ok(tokens) => SplitStatements {
            statements: split_tokens(&tokens),
            error: None,
        },
        Err(err) => {
            log::warn!("SQL tokenizer failed, falling back to text split: {err}");
            let statements = split_top_level(sql, ';')
                .into_iter()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            SplitStatements {
                statements,
                error: Some(err),
            }
        }
    }
}

fn split_tokens(tokens: &[Token]) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;

    for token in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth -= 1,
            Token::SemiColon if depth <= 0 => {
                push_statement(&mut statements, &current);
                current.clear();
                depth = 0;
                continue;
            }
            Token::EOF => continue,
            Token::Whitespace(Whitespace::SingleLineComment { .. }) => {
                current.push('\n');
                continue;
            }
            Token::Whitespace(Whitespace::MultiLineComment(_)) => {
                current.push(' ');
                continue;
            }
            _ => {}
        }
        current.push_str(&token.to_string());
    }
    push_statement(&mut statements, &current);
    statements
}

fn push_statement(statements: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
