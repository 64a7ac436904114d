//! Parsed SQL statement model

use dax_core::text::is_identifier;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Statement kind, decided by the leading keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Alter,
    Drop,
    Merge,
    With,
    Unknown,
}

impl StatementKind {
    /// Classify a statement by its first word
    pub fn classify(statement: &str) -> Self {
        let first = statement
            .trim_start_matches(|c: char| c.is_whitespace() || c == '(')
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .next()
            .unwrap_or("")
            .to_uppercase();
        match first.as_str() {
            "SELECT" => StatementKind::Select,
            "INSERT" => StatementKind::Insert,
            "UPDATE" => StatementKind::Update,
            "DELETE" => StatementKind::Delete,
            "CREATE" => StatementKind::Create,
            "ALTER" => StatementKind::Alter,
            "DROP" => StatementKind::Drop,
            "MERGE" => StatementKind::Merge,
            "WITH" => StatementKind::With,
            _ => StatementKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Create => "CREATE",
            StatementKind::Alter => "ALTER",
            StatementKind::Drop => "DROP",
            StatementKind::Merge => "MERGE",
            StatementKind::With => "WITH",
            StatementKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One statement of a SQL script
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statement {
    Select(SelectStatement),
    Insert { original: String },
    Update { original: String },
    Delete { original: String },
    Unsupported { kind: StatementKind, original: String },
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Select(_) => StatementKind::Select,
            Statement::Insert { .. } => StatementKind::Insert,
            Statement::Update { .. } => StatementKind::Update,
            Statement::Delete { .. } => StatementKind::Delete,
            Statement::Unsupported { kind, .. } => *kind,
        }
    }

    /// Statement text as written
    pub fn original(&self) -> &str {
        match self {
            Statement::Select(select) => &select.original,
            Statement::Insert { original }
            | Statement::Update { original }
            | Statement::Delete { original }
            | Statement::Unsupported { original, .. } => original,
        }
    }
}

/// A decomposed SELECT statement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectStatement {
    pub original: String,
    pub columns: Vec<SelectColumn>,
    /// Comma-separated FROM tables, schema prefixes removed. JOINed tables
    /// live only in `joins`; `TableScope` and object identification read both.
    pub tables: Vec<String>,
    /// Table alias → table name, covering FROM and JOIN
    pub table_aliases: BTreeMap<String, String>,
    pub where_clause: Option<String>,
    pub group_by: Vec<String>,
    pub having: Option<String>,
    pub order_by: Vec<String>,
    pub joins: Vec<Join>,
    pub has_aggregation: bool,
}

impl SelectStatement {
    /// First FROM table, used as the measure and filter table
    pub fn primary_table(&self) -> Option<&str> {
        self.tables.first().map(String::as_str)
    }
}

/// One entry of a select list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectColumn {
    /// Entry as written, alias included
    pub original: String,
    /// Entry without its alias
    pub expression: String,
    /// Column name: the aggregate's argument, or the unqualified reference
    pub column: String,
    /// Table qualifier written before the column (`o` in `o.amount`)
    pub qualifier: Option<String>,
    pub alias: Option<String>,
    pub is_aggregation: bool,
    /// Aggregate function name as written
    pub function: Option<String>,
    /// `COUNT(DISTINCT x)`
    pub distinct: bool,
    /// The aggregate is part of a larger expression (`ROUND(SUM(x), 2)`)
    pub compound: bool,
}

impl SelectColumn {
    /// True unless the entry is a plain (optionally qualified) column name
    pub fn is_computed(&self) -> bool {
        !is_column_reference(&self.expression)
    }
}

/// JOIN flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    /// Kind for a matched join keyword such as `LEFT OUTER JOIN`
    pub fn from_keyword(keyword: &str) -> Self {
        let upper = keyword.to_uppercase();
        if upper.starts_with("LEFT") {
            JoinKind::Left
        } else if upper.starts_with("RIGHT") {
            JoinKind::Right
        } else if upper.starts_with("FULL") {
            JoinKind::Full
        } else if upper.starts_with("CROSS") {
            JoinKind::Cross
        } else {
            JoinKind::Inner
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        };
        f.write_str(text)
    }
}

/// A JOIN in the FROM clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub alias: Option<String>,
    pub condition: Option<String>,
}

/// True for `col`, `t.col`, `schema.t.col`, `[Col Name]`, `t.[Col]` and
/// `"Col"`
pub fn is_column_reference(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    let parts = split_qualified(text);
    !parts.is_empty()
        && parts
            .iter()
            .all(|part| (is_identifier(part) && !is_reserved(part)) || is_delimited(part))
}

/// Split a dotted reference into its parts, respecting `[..]` and `".."`
pub fn split_qualified(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut delimiter: Option<char> = None;
    for (idx, ch) in text.char_indices() {
        match (delimiter, ch) {
            (Some(close), c) if c == close => delimiter = None,
            (Some(_), _) => {}
            (None, '[') => delimiter = Some(']'),
            (None, '"') => delimiter = Some('"'),
            (None, '.') => {
                parts.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Strip `[..]` or `".."` delimiters from an identifier
pub fn undelimit(part: &str) -> &str {
    let part = part.trim();
    part.strip_prefix('[')
        .and_then(|p| p.strip_suffix(']'))
        .or_else(|| part.strip_prefix('"').and_then(|p| p.strip_suffix('"')))
        .unwrap_or(part)
}

fn is_delimited(part: &str) -> bool {
    let inner = undelimit(part);
    inner.len() + 2 == part.len() && !inner.is_empty()
}

/// Words that are never column names
pub const RESERVED: &[&str] = &[
    "SELECT", "FROM", "WHERE", "AND", "OR", "NOT", "CASE", "WHEN", "THEN", "ELSE", "END", "AS",
    "IN", "IS", "NULL", "LIKE", "BETWEEN", "EXISTS", "DISTINCT", "ALL", "ANY", "SOME", "ASC",
    "DESC", "TRUE", "FALSE", "ON", "JOIN", "BY", "TOP", "UNION", "INTERSECT", "EXCEPT", "OVER",
    "PARTITION", "INTERVAL", "YEAR", "MONTH", "DAY", "HOUR", "MINUTE", "SECOND", "DATE", "TIME",
    "TEXT", "INTEGER", "DECIMAL", "DOUBLE", "CURRENCY", "DATETIME", "BOOLEAN", "STRING",
];

/// True when `word` is reserved (case-insensitive)
pub fn is_reserved(word: &str) -> bool {
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(word))
}

#[cfg(test)]
#[path = "statement_test.rs"]
mod tests;
