//! SELECT clause extraction.
//!
//! Clauses are located positionally: each clause runs from its keyword to
//! the next clause keyword found at parenthesis depth zero, so subqueries
//! and literals never end a clause early.

use dax_core::text::{
    closing_paren, find_calls, find_keywords, is_identifier, split_top_level, KeywordMatch,
};
use regex::Regex;
use std::sync::OnceLock;

use crate::statement::{
    is_column_reference, is_reserved, split_qualified, undelimit, Join, JoinKind, SelectColumn,
    SelectStatement,
};

const CLAUSE_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "GROUP BY", "HAVING", "ORDER BY", "LIMIT", "OFFSET", "FETCH",
    "UNION", "INTERSECT", "EXCEPT",
];

const SET_OPERATIONS: &[&str] = &["UNION", "INTERSECT", "EXCEPT"];

const JOIN_KEYWORDS: &[&str] = &[
    "INNER JOIN",
    "LEFT OUTER JOIN",
    "LEFT JOIN",
    "RIGHT OUTER JOIN",
    "RIGHT JOIN",
    "FULL OUTER JOIN",
    "FULL JOIN",
    "CROSS JOIN",
    "JOIN",
];

/// Aggregate functions recognised in a select list
pub const AGGREGATE_FUNCTIONS: &[&str] = &[
    "SUM", "COUNT", "AVG", "MIN", "MAX", "STDEV", "VAR", "COUNT_BIG", "GROUPING", "CHECKSUM_AGG",
];

/// True when `name` is an aggregate function (case-insensitive)
pub fn is_aggregate(name: &str) -> bool {
    AGGREGATE_FUNCTIONS
        .iter()
        .any(|agg| agg.eq_ignore_ascii_case(name))
}

/// Clause texts of one SELECT, keywords excluded
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectClauses<'a> {
    pub select: Option<&'a str>,
    pub from: Option<&'a str>,
    pub where_clause: Option<&'a str>,
    pub group_by: Option<&'a str>,
    pub having: Option<&'a str>,
    pub order_by: Option<&'a str>,
    /// First set operation joining this query to another
    pub set_operation: Option<&'static str>,
}

impl<'a> SelectClauses<'a> {
    /// Locate the first occurrence of each clause at depth zero
    pub fn locate(statement: &'a str) -> Self {
        let marks = find_keywords(statement, CLAUSE_KEYWORDS);
        Self {
            select: clause_text(statement, &marks, "SELECT"),
            from: clause_text(statement, &marks, "FROM"),
            where_clause: clause_text(statement, &marks, "WHERE"),
            group_by: clause_text(statement, &marks, "GROUP BY"),
            having: clause_text(statement, &marks, "HAVING"),
            order_by: clause_text(statement, &marks, "ORDER BY"),
            set_operation: marks
                .iter()
                .find(|m| SET_OPERATIONS.contains(&m.keyword))
                .map(|m| m.keyword),
        }
    }
}

fn clause_text<'a>(statement: &'a str, marks: &[KeywordMatch], name: &str) -> Option<&'a str> {
    let pos = marks.iter().position(|m| m.keyword == name)?;
    let end = marks
        .get(pos + 1)
        .map(|m| m.start)
        .unwrap_or(statement.len());
    Some(statement[marks[pos].end..end].trim())
}

/// Remove parentheses wrapping a whole statement: `(SELECT ...)`
pub fn strip_wrapping_parens(statement: &str) -> &str {
    let mut text = statement.trim();
    while text.starts_with('(') && closing_paren(text, 0) == Some(text.len() - 1) {
        text = text[1..text.len() - 1].trim();
    }
    text
}

/// Decompose a SELECT statement
pub fn parse_select(statement: &str) -> SelectStatement {
    let body = strip_wrapping_parens(statement);
    let clauses = SelectClauses::locate(body);
    let mut select = SelectStatement {
        original: statement.trim().to_string(),
        ..Default::default()
    };

    if let Some(list) = clauses.select {
        select.columns = split_top_level(strip_select_modifiers(list), ',')
            .into_iter()
            .filter(|item| !item.is_empty())
            .map(parse_column)
            .collect();
    }
    if let Some(from) = clauses.from {
        parse_from(from, &mut select);
    }
    select.where_clause = non_empty(clauses.where_clause);
    select.group_by = list_items(clauses.group_by);
    select.having = non_empty(clauses.having);
    select.order_by = list_items(clauses.order_by);
    select.has_aggregation = select.columns.iter().any(|c| c.is_aggregation);
    select
}

fn non_empty(clause: Option<&str>) -> Option<String> {
    clause.filter(|c| !c.is_empty()).map(str::to_string)
}

fn list_items(clause: Option<&str>) -> Vec<String> {
    clause
        .map(|c| {
            split_top_level(c, ',')
                .into_iter()
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn select_modifier_regex() -> &'static Regex {
    static MODIFIER_RE: OnceLock<Regex> = OnceLock::new();
    MODIFIER_RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*(?:DISTINCT\s+|ALL\s+)?(?:TOP\s*(?:\([^)]*\)|\d+)(?:\s+PERCENT)?(?:\s+WITH\s+TIES)?\s+)?",
        )
        .expect("valid regex")
    })
}

/// Drop `DISTINCT`, `ALL` and `TOP n` in front of the select list
fn strip_select_modifiers(list: &str) -> &str {
    match select_modifier_regex().find(list) {
        Some(m) => &list[m.end()..],
        None => list,
    }
}

/// Parse one select-list entry
pub fn parse_column(raw: &str) -> SelectColumn {
    let (expression, alias) = split_alias(raw);
    let mut column = SelectColumn {
        original: raw.trim().to_string(),
        expression: expression.to_string(),
        alias,
        ..Default::default()
    };

    let calls = find_calls(expression);
    match calls.iter().find(|call| is_aggregate(call.name)) {
        Some(call) => {
            let (distinct, argument) = strip_distinct(call.arguments(expression));
            column.is_aggregation = true;
            column.function = Some(call.name.to_string());
            column.distinct = distinct;
            column.compound = call.start != 0 || call.end(expression) != expression.len();
            set_reference(&mut column, argument);
        }
        None => set_reference(&mut column, expression),
    }
    column
}

fn strip_distinct(argument: &str) -> (bool, &str) {
    match find_keywords(argument, &["DISTINCT"]).first() {
        Some(kw) if kw.start == 0 => (true, argument[kw.end..].trim()),
        _ => (false, argument),
    }
}

fn set_reference(column: &mut SelectColumn, text: &str) {
    let text = text.trim();
    if is_column_reference(text) {
        let parts = split_qualified(text);
        let last = parts.len() - 1;
        column.column = undelimit(parts[last]).to_string();
        column.qualifier = last
            .checked_sub(1)
            .map(|i| undelimit(parts[i]).to_string());
    } else {
        column.column = text.to_string();
    }
}

/// Split `expr AS name` or `expr name` into expression and alias.
///
/// A bare trailing identifier only counts as an alias when the expression
/// before it contains a dot or a function call. This is a best-effort
/// heuristic: `a b` stays ambiguous and is left intact, and only `AS`
/// marks an alias reliably.
pub fn split_alias(raw: &str) -> (&str, Option<String>) {
    let raw = raw.trim();
    if let Some(kw) = find_keywords(raw, &["AS"]).last() {
        let name = raw[kw.end..].trim();
        if is_alias_name(name) {
            return (raw[..kw.start].trim(), Some(unquote(name).to_string()));
        }
    }

    if let Some((prefix, name)) = raw.rsplit_once(char::is_whitespace) {
        let prefix = prefix.trim_end();
        let attached = prefix
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | ')' | ']' | '"'));
        let shaped = prefix.contains('.') || !find_calls(prefix).is_empty();
        if is_identifier(name) && !is_reserved(name) && attached && shaped {
            return (prefix, Some(name.to_string()));
        }
    }
    (raw, None)
}

fn is_alias_name(name: &str) -> bool {
    (is_identifier(name) && !is_reserved(name)) || unquote(name).len() + 2 == name.len()
}

fn unquote(name: &str) -> &str {
    let name = undelimit(name);
    name.strip_prefix('\'')
        .and_then(|n| n.strip_suffix('\''))
        .unwrap_or(name)
}

/// A table reference with its optional alias
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

/// Parse `schema.table [AS] alias`; derived tables yield `None`
pub fn parse_table_ref(text: &str) -> Option<TableRef> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('(') {
        return None;
    }
    let (name_part, rest) = split_first_token(text);
    let parts = split_qualified(name_part);
    let name = undelimit(parts.last()?).to_string();
    if name.is_empty() {
        return None;
    }

    let mut words = rest.split_whitespace();
    let alias = match words.next() {
        Some(w) if w.eq_ignore_ascii_case("AS") => words.next(),
        other => other,
    }
    .filter(|w| {
        let bare = undelimit(w);
        !w.eq_ignore_ascii_case("WITH") && !is_reserved(bare) && is_identifier(bare)
    })
    .map(|w| undelimit(w).to_string());

    Some(TableRef { name, alias })
}

/// First whitespace-separated token, treating `[..]` and `".."` as opaque
fn split_first_token(text: &str) -> (&str, &str) {
    let mut delimiter: Option<char> = None;
    for (idx, ch) in text.char_indices() {
        match (delimiter, ch) {
            (Some(close), c) if c == close => delimiter = None,
            (Some(_), _) => {}
            (None, '[') => delimiter = Some(']'),
            (None, '"') => delimiter = Some('"'),
            (None, c) if c.is_whitespace() => return (&text[..idx], text[idx..].trim()),
            _ => {}
        }
    }
    (text, "")
}

fn parse_from(from: &str, select: &mut SelectStatement) {
    let joins = find_keywords(from, JOIN_KEYWORDS);
    let base_end = joins.first().map(|j| j.start).unwrap_or(from.len());

    for item in split_top_level(&from[..base_end], ',') {
        if let Some(table) = parse_table_ref(item) {
            if let Some(alias) = &table.alias {
                select
                    .table_aliases
                    .insert(alias.clone(), table.name.clone());
            }
            select.tables.push(table.name);
        }
    }

    for (i, join) in joins.iter().enumerate() {
        let end = joins.get(i + 1).map(|j| j.start).unwrap_or(from.len());
        let segment = &from[join.end..end];
        let (target, condition) = match find_keywords(segment, &["ON", "USING"]).first() {
            Some(on) => (&segment[..on.start], non_empty(Some(segment[on.end..].trim()))),
            None => (segment, None),
        };
        let Some(table) = parse_table_ref(target) else {
            continue;
        };
        if let Some(alias) = &table.alias {
            select
                .table_aliases
                .insert(alias.clone(), table.name.clone());
        }
        select.joins.push(Join {
            kind: JoinKind::from_keyword(join.keyword),
            table: table.name,
            alias: table.alias,
            condition,
        });
    }
}

#[cfg(test)]
#[path = "select_test.rs"]
mod tests;
