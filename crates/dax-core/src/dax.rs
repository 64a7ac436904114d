//! Small builders for DAX output text

use crate::text::is_identifier;

/// Placeholder value for a missing branch
pub const BLANK: &str = "BLANK()";

/// Reference a table, quoting names that are not plain identifiers
pub fn table_ref(table: &str) -> String {
    let table = table.trim();
    if is_identifier(table) {
        table.to_string()
    } else {
        format!("'{}'", table.replace('\'', "''"))
    }
}

/// `Table[Column]`
pub fn column_ref(table: &str, column: &str) -> String {
    format!("{}[{}]", table_ref(table), column.trim().replace(']', "]]"))
}

/// `FILTER(Table, predicate)`
pub fn filter(table: &str, predicate: &str) -> String {
    format!("FILTER({}, {})", table_ref(table), predicate.trim())
}

/// Single-line DAX comment
pub fn comment(text: &str) -> String {
    format!("-- {}", text.trim())
}

/// `Name = expression`
pub fn assignment(name: &str, expression: &str) -> String {
    format!("{} = {}", name.trim(), expression.trim())
}

/// `SWITCH(operand, when, then, ..., default)`; searched form uses `TRUE()`
pub fn switch(operand: Option<&str>, arms: &[(String, String)], default: &str) -> String {
    let mut parts = vec![operand.unwrap_or("TRUE()").trim().to_string()];
    for (when, then) in arms {
        parts.push(when.trim().to_string());
        parts.push(then.trim().to_string());
    }
    parts.push(default.trim().to_string());
    format!("SWITCH({})", parts.join(", "))
}

/// Iterator counterpart of an aggregate (`SUM` → `SUMX`), for aggregates
/// over a computed argument
pub fn iterator_function(function: &str) -> Option<&'static str> {
    match function {
        "SUM" => Some("SUMX"),
        "AVERAGE" => Some("AVERAGEX"),
        "MIN" => Some("MINX"),
        "MAX" => Some("MAXX"),
        "COUNT" => Some("COUNTX"),
        "MEDIAN" => Some("MEDIANX"),
        "STDEV.S" => Some("STDEVX.S"),
        "STDEV.P" => Some("STDEVX.P"),
        "VAR.S" => Some("VARX.S"),
        "VAR.P" => Some("VARX.P"),
        _ => None,
    }
}
