//! Object identification for SQL scripts

use dax_core::rewrite::MaskedText;
use dax_core::text::find_calls;
use dax_core::{ObjectCategory, ObjectIndex};
use regex::Regex;
use std::sync::OnceLock;

use crate::select::parse_table_ref;
use crate::statement::{is_column_reference, is_reserved, split_qualified, undelimit, Statement};

/// Words that look like calls but are not functions
const NON_FUNCTIONS: &[&str] = &[
    "IN", "EXISTS", "AS", "ON", "AND", "OR", "NOT", "VALUES", "OVER", "INTO", "USING", "WHEN",
    "THEN", "ELSE", "FROM", "SELECT", "WHERE", "ALL", "ANY", "SOME", "TABLE", "WITH",
];

fn dml_target_regex() -> &'static Regex {
    static TARGET_RE: OnceLock<Regex> = OnceLock::new();
    TARGET_RE.get_or_init(|| {
        Regex::new(
            r#"(?i)^\s*(?:UPDATE|INSERT\s+INTO|DELETE\s+FROM|DELETE)\s+((?:\[[^\]]+\]|"[^"]+"|\w+)(?:\.(?:\[[^\]]+\]|"[^"]+"|\w+))*)"#,
        )
        .expect("valid regex")
    })
}

fn comparison_operand_regex() -> &'static Regex {
    static OPERAND_RE: OnceLock<Regex> = OnceLock::new();
    OPERAND_RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)?)\s*(?:<>|!=|>=|<=|=|>|<|\bIS\b|\bLIKE\b|\bIN\b|\bBETWEEN\b)",
        )
        .expect("valid regex")
    })
}

/// Index the tables, columns, functions and aliases of parsed statements
pub fn identify_objects(statements: &[Statement]) -> ObjectIndex {
    let mut index = ObjectIndex::new();
    for statement in statements {
        match statement {
            Statement::Select(select) => {
                index.extend(ObjectCategory::Tables, &select.tables);
                for join in &select.joins {
                    index.insert(ObjectCategory::Tables, &join.table);
                    if let Some(alias) = &join.alias {
                        index.insert(ObjectCategory::Aliases, alias);
                    }
                }
                index.extend(ObjectCategory::Aliases, select.table_aliases.keys());
                for column in &select.columns {
                    if let Some(alias) = &column.alias {
                        index.insert(ObjectCategory::Aliases, alias);
                    }
                    if is_column_reference(&column.column) {
                        index.insert(ObjectCategory::Columns, &column.column);
                    }
                }
                let listed = select.group_by.iter().chain(&select.order_by);
                for item in listed {
                    let reference = item
                        .split_whitespace()
                        .next()
                        .unwrap_or_default();
                    if is_column_reference(reference) {
                        index.insert(ObjectCategory::Columns, last_part(reference));
                    }
                }
                if let Some(predicate) = &select.where_clause {
                    let masked = MaskedText::new(predicate);
                    for caps in comparison_operand_regex().captures_iter(masked.text()) {
                        let operand = &caps[1];
                        if !is_reserved(operand) {
                            index.insert(ObjectCategory::Columns, last_part(operand));
                        }
                    }
                }
                for call in find_calls(&select.original) {
                    let name = call.name.to_uppercase();
                    if !NON_FUNCTIONS.contains(&name.as_str()) {
                        index.insert(ObjectCategory::Functions, name);
                    }
                }
            }
            other => {
                if let Some(caps) = dml_target_regex().captures(other.original()) {
                    if let Some(table) = parse_table_ref(&caps[1]) {
                        index.insert(ObjectCategory::Tables, table.name);
                    }
                }
            }
        }
    }
    index
}

fn last_part(reference: &str) -> &str {
    split_qualified(reference)
        .last()
        .copied()
        .map(undelimit)
        .unwrap_or(reference)
}
