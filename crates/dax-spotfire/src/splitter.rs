//! Split Spotfire source into expressions.
//!
//! Lines accumulate until their parentheses balance, so an expression
//! wrapped over several lines is reassembled into one. Blank lines and
//! `--` comment lines are skipped.

use dax_core::text::paren_balance;

use crate::error::SpotfireError;

/// One expression with the line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExpression {
    pub text: String,
    /// 1-based line number
    pub line: usize,
    /// False when the parentheses never balanced
    pub balanced: bool,
}

/// Expressions in source order plus the balance errors found on the way
#[derive(Debug, Default)]
pub struct SplitExpressions {
    pub expressions: Vec<RawExpression>,
    pub errors: Vec<SpotfireError>,
}

/// Split `source` into expressions, joining wrapped lines with a space
pub fn split_expressions(source: &str) -> SplitExpressions {
    let mut split = SplitExpressions::default();
    let mut current = String::new();
    let mut start_line = 0;

    for (idx, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("--") {
            continue;
        }
        if current.is_empty() {
            start_line = idx + 1;
        } else {
            current.push(' ');
        }
        current.push_str(line);

        let (depth, lowest) = paren_balance(&current);
        if lowest < 0 {
            split
                .errors
                .push(SpotfireError::UnexpectedClose { line: start_line });
            split.expressions.push(RawExpression {
                text: std::mem::take(&mut current),
                line: start_line,
                balanced: false,
            });
        } else if depth == 0 {
            split.expressions.push(RawExpression {
                text: std::mem::take(&mut current),
                line: start_line,
                balanced: true,
            });
        }
    }

    if !current.is_empty() {
        let (depth, _) = paren_balance(&current);
        split.errors.push(SpotfireError::UnclosedParentheses {
            line: start_line,
            depth,
        });
        split.expressions.push(RawExpression {
            text: current,
            line: start_line,
            balanced: false,
        });
    }
    split
}
