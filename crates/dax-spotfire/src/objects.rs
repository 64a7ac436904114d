//! Object identification for Spotfire expressions

use dax_core::text::find_calls;
use dax_core::{ObjectCategory, ObjectIndex};

use crate::expression::Expression;

/// Words that look like calls but are not functions
const NON_FUNCTIONS: &[&str] = &["over", "and", "or", "not", "in", "when", "then", "else"];

/// Index the columns, functions and aliases of parsed expressions.
///
/// Expressions never name tables, so the table set stays empty.
pub fn identify_objects(expressions: &[Expression]) -> ObjectIndex {
    let mut index = ObjectIndex::new();
    for expression in expressions {
        let alias = expression.alias();
        if let Some(alias) = alias {
            index.insert(ObjectCategory::Aliases, alias);
        }
        let text = expression.original();
        for name in bracket_names(text) {
            if Some(name) != alias {
                index.insert(ObjectCategory::Columns, name);
            }
        }
        for call in find_calls(text) {
            if !NON_FUNCTIONS.contains(&call.name.to_lowercase().as_str()) {
                index.insert(ObjectCategory::Functions, call.name);
            }
        }
    }
    index
}

/// Contents of every `[...]` outside string literals
fn bracket_names(text: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut quote: Option<char> = None;
    let mut open: Option<usize> = None;
    for (idx, ch) in text.char_indices() {
        match (quote, open, ch) {
            (Some(q), _, c) if c == q => quote = None,
            (Some(_), _, _) => {}
            (None, Some(start), ']') => {
                names.push(&text[start..idx]);
                open = None;
            }
            (None, Some(_), _) => {}
            (None, None, '\'' | '"') => quote = Some(ch),
            (None, None, '[') => open = Some(idx + 1),
            _ => {}
        }
    }
    names
}
