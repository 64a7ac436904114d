//! SQL parser: statement splitting, classification and SELECT decomposition

use dax_core::text::paren_balance;
use dax_core::{DialectParser, ParsedUnit, TokenizerDialect};

use crate::dialect::{self, GenericDialect, SqlDialect};
use crate::error::SqlError;
use crate::objects::identify_objects;
use crate::select::{parse_select, strip_wrapping_parens, SelectClauses};
use crate::splitter::split_statements;
use crate::statement::{Statement, StatementKind};
use crate::validator::advisory_warnings;

/// SQL parser over a tokenizer dialect
pub struct SqlParser {
    dialect: Box<dyn SqlDialect>,
}

impl SqlParser {
    /// Create a new parser with the generic dialect
    pub fn generic() -> Self {
        Self {
            dialect: Box::new(GenericDialect::new()),
        }
    }

    /// Create a parser for a configured tokenizer dialect
    pub fn from_tokenizer_dialect(dialect: TokenizerDialect) -> Self {
        Self {
            dialect: dialect::from_tokenizer_dialect(dialect),
        }
    }

    /// Get the dialect name
    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }

    fn parse_statement(index: usize, text: &str, unit: &mut ParsedUnit<Statement>) -> Statement {
        let (balance, lowest) = paren_balance(text);
        if balance != 0 || lowest < 0 {
            let detail = if lowest < 0 {
                "unexpected ')'".to_string()
            } else if balance > 0 {
                format!("{balance} unclosed '('")
            } else {
                format!("{} extra ')'", -balance)
            };
            record(unit, SqlError::UnbalancedParentheses {
                statement: index,
                detail,
            });
        }

        let original = text.to_string();
        match StatementKind::classify(text) {
            StatementKind::Select => {
                if SelectClauses::locate(strip_wrapping_parens(text)).from.is_none() {
                    record(unit, SqlError::MissingClause {
                        statement: index,
                        clause: "FROM",
                    });
                }
                Statement::Select(parse_select(text))
            }
            StatementKind::Insert => Statement::Insert { original },
            StatementKind::Update => Statement::Update { original },
            StatementKind::Delete => Statement::Delete { original },
            kind => Statement::Unsupported { kind, original },
        }
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::generic()
    }
}

fn record(unit: &mut ParsedUnit<Statement>, err: SqlError) {
    unit.error(err.to_string(), err.suggestion());
}

impl DialectParser for SqlParser {
    type Item = Statement;

    fn parse(&self, source: &str) -> ParsedUnit<Statement> {
        let mut unit = ParsedUnit::new();
        if source.trim().is_empty() {
            record(&mut unit, SqlError::EmptySql);
            return unit;
        }

        let split = split_statements(self.dialect.as_ref(), source);
        if let Some(err) = split.error {
            record(&mut unit, err);
        }
        for (idx, text) in split.statements.iter().enumerate() {
            let statement = Self::parse_statement(idx + 1, text, &mut unit);
            unit.items.push(statement);
        }

        unit.objects = identify_objects(&unit.items);
        unit.warnings = advisory_warnings(source);
        log::debug!(
            "parsed {} SQL statement(s) with the {} dialect, {} error(s)",
            unit.items.len(),
            self.dialect.name(),
            unit.parse_errors.len()
        );
        unit
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
