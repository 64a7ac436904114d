//! Advisory warnings for SQL that converts with caveats

use dax_core::rewrite::MaskedText;
use regex::Regex;
use std::sync::OnceLock;

pub const SELECT_STAR: &str =
    "SELECT * is not recommended for DAX conversion. Specify explicit columns.";
pub const NULL_HANDLING: &str =
    "NULL handling differs between SQL and DAX. Review NULL-related logic.";
pub const SUBQUERIES: &str = "Subqueries require special handling in DAX conversion.";
pub const COMMON_TABLE_EXPRESSIONS: &str =
    "CTEs (Common Table Expressions) need to be converted to DAX variables or separate measures.";
pub const SET_OPERATIONS: &str =
    "Set operations (UNION, INTERSECT, EXCEPT) are not translated; only the first query block is converted.";

struct Check {
    pattern: &'static str,
    warning: &'static str,
}

const CHECKS: &[Check] = &[
    Check {
        pattern: r"(?i)\bSELECT\s+(?:DISTINCT\s+|TOP\s+\d+\s+)*\*",
        warning: SELECT_STAR,
    },
    Check {
        pattern: r"(?i)\bNULL\b",
        warning: NULL_HANDLING,
    },
    Check {
        pattern: r"(?i)\(\s*SELECT\b|\bEXISTS\b|\bIN\s*\(",
        warning: SUBQUERIES,
    },
    Check {
        pattern: r"(?is)\bWITH\s+(?:RECURSIVE\s+)?[A-Za-z_]\w*(?:\s*\([^)]*\))?\s+AS\s*\(",
        warning: COMMON_TABLE_EXPRESSIONS,
    },
    Check {
        pattern: r"(?i)\b(?:UNION|INTERSECT|EXCEPT)\b",
        warning: SET_OPERATIONS,
    },
];

fn compiled() -> &'static [(Regex, &'static str)] {
    static COMPILED: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        CHECKS
            .iter()
            .map(|c| (Regex::new(c.pattern).expect("valid regex"), c.warning))
            .collect()
    })
}

/// Warnings for constructs that need manual review, in a fixed order.
///
/// Detection ignores string literals and bracketed names, so `'NULL'` or
/// `[In (EUR)]` do not trigger anything.
pub fn advisory_warnings(sql: &str) -> Vec<String> {
    let masked = MaskedText::new(sql);
    compiled()
        .iter()
        .filter(|(re, _)| re.is_match(masked.text()))
        .map(|(_, warning)| warning.to_string())
        .collect()
}
