//! SQL tokenizer dialect abstraction

use dax_core::TokenizerDialect;
use sqlparser::dialect::{
    AnsiDialect as SqlParserAnsi, Dialect, GenericDialect as SqlParserGeneric,
    MsSqlDialect as SqlParserMsSql,
};
use sqlparser::tokenizer::{Token, Tokenizer};

use crate::error::{SqlError, SqlResult};

/// Trait for SQL dialect implementations
pub trait SqlDialect: Send + Sync {
    /// Get the underlying sqlparser dialect
    fn parser_dialect(&self) -> &dyn Dialect;

    /// Tokenize SQL, keeping literals exactly as written
    fn tokenize(&self, sql: &str) -> SqlResult<Vec<Token>> {
        Tokenizer::new(self.parser_dialect(), sql)
            .with_unescape(false)
            .tokenize()
            .map_err(|e| {
                let msg = e.to_string();
                let (line, column) = parse_location_from_error(&msg);
                SqlError::TokenizeError {
                    message: msg,
                    line,
                    column,
                }
            })
    }

    /// Get the dialect name
    fn name(&self) -> &'static str;
}

/// Build the dialect selected in configuration
pub fn from_tokenizer_dialect(dialect: TokenizerDialect) -> Box<dyn SqlDialect> {
    match dialect {
        TokenizerDialect::Generic => Box::new(GenericDialect::new()),
        TokenizerDialect::MsSql => Box::new(MsSqlDialect::new()),
        TokenizerDialect::Ansi => Box::new(AnsiDialect::new()),
    }
}

/// Resolve a dialect name (`generic`, `mssql` or `tsql`, `ansi`)
pub fn from_dialect_name(name: &str) -> SqlResult<TokenizerDialect> {
    match name.trim().to_lowercase().as_str() {
        "generic" => Ok(TokenizerDialect::Generic),
        "mssql" | "tsql" => Ok(TokenizerDialect::MsSql),
        "ansi" => Ok(TokenizerDialect::Ansi),
        _ => Err(SqlError::UnknownDialect(name.to_string())),
    }
}

/// Parse line and column from a sqlparser error message.
///
/// Tokenizer errors carry their location only in the message text
/// ("... at Line: X, Column: Y").
fn parse_location_from_error(msg: &str) -> (usize, usize) {
    let Some(line_idx) = msg.find("Line: ") else {
        return (0, 0);
    };
    let line_start = line_idx + 6;
    let Some(comma_idx) = msg[line_start..].find(',') else {
        return (0, 0);
    };
    let Ok(line) = msg[line_start..line_start + comma_idx]
        .trim()
        .parse::<usize>()
    else {
        return (0, 0);
    };
    let Some(col_idx) = msg.find("Column: ") else {
        return (line, 0);
    };
    let col_start = col_idx + 8;
    let col_end = msg[col_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|i| col_start + i)
        .unwrap_or(msg.len());
    let column = msg[col_start..col_end].trim().parse::<usize>().unwrap_or(0);
    (line, column)
}

/// Dialect-neutral SQL
pub struct GenericDialect {
    dialect: SqlParserGeneric,
}

impl GenericDialect {
    /// Create a new generic dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserGeneric {},
        }
    }
}

impl Default for GenericDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for GenericDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}

/// SQL Server (T-SQL) dialect, with `[bracketed]` identifiers
pub struct MsSqlDialect {
    dialect: SqlParserMsSql,
}

impl MsSqlDialect {
    /// Create a new SQL Server dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserMsSql {},
        }
    }
}

impl Default for MsSqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for MsSqlDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "mssql"
    }
}

/// ANSI SQL dialect
pub struct AnsiDialect {
    dialect: SqlParserAnsi,
}

impl AnsiDialect {
    /// Create a new ANSI dialect
    pub fn new() -> Self {
        Self {
            dialect: SqlParserAnsi {},
        }
    }
}

impl Default for AnsiDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for AnsiDialect {
    fn parser_dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn name(&self) -> &'static str {
        "ansi"
    }
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
