//! Advisory warnings for Spotfire constructs that convert with caveats

use dax_core::rewrite::MaskedText;
use regex::Regex;
use std::sync::OnceLock;

pub const NULL_HANDLING: &str =
    "NULL/Empty handling differs between Spotfire and DAX. Review null-checking logic.";
pub const OVER_CLAUSES: &str =
    "OVER clauses require context conversion in DAX. May need FILTER or CALCULATE functions.";
pub const RANKING: &str = "Ranking functions need context specification in DAX using RANKX.";
pub const NODE_REFERENCES: &str =
    "Node references are Spotfire-specific and may not have direct DAX equivalents.";
pub const SET_OPERATIONS: &str = "Set operations require different approaches in DAX.";

const CHECKS: &[(&str, &str)] = &[
    (r"(?i)\bIsNull\b|\bIsEmpty\b", NULL_HANDLING),
    (r"(?i)\bOver\s*\(", OVER_CLAUSES),
    (r"(?i)\bRank\b|\bDenseRank\b|\bRowNumber\b", RANKING),
    (r"(?i)\bNode\s*\[", NODE_REFERENCES),
    (r"(?i)\bIntersect\b|\bUnionAll\b", SET_OPERATIONS),
];

fn compiled() -> &'static [(Regex, &'static str)] {
    static COMPILED: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        CHECKS
            .iter()
            .map(|(pattern, warning)| (Regex::new(pattern).expect("valid regex"), *warning))
            .collect()
    })
}

/// Warnings for constructs that need manual review, in a fixed order.
/// Column names and string literals are ignored.
pub fn advisory_warnings(source: &str) -> Vec<String> {
    let masked = MaskedText::new(source);
    compiled()
        .iter()
        .filter(|(re, _)| re.is_match(masked.text()))
        .map(|(_, warning)| warning.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_warning() {
        assert_eq!(advisory_warnings("IsNull([x])"), vec![NULL_HANDLING.to_string()]);
        assert_eq!(
            advisory_warnings("Sum([x]) OVER ([Region])"),
            vec![OVER_CLAUSES.to_string()]
        );
        assert_eq!(advisory_warnings("Rank([x], \"desc\")"), vec![RANKING.to_string()]);
        assert_eq!(
            advisory_warnings("Sum([x]) over (Intersect([A], [B]))"),
            vec![OVER_CLAUSES.to_string(), SET_OPERATIONS.to_string()]
        );
    }

    #[test]
    fn test_names_and_literals_do_not_warn() {
        assert!(advisory_warnings("[IsNull Flag] & 'Rank'").is_empty());
        assert!(advisory_warnings("Sum([Sales])").is_empty());
    }
}
