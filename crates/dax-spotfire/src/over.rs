//! OVER clause interpretation.
//!
//! Only partitioning translates to DAX: `PARTITION BY a, b`, a plain column
//! list, or `Intersect([A], [B])`. Node navigation methods such as
//! `AllPrevious([Date])` have no direct equivalent.

use dax_core::text::{find_calls, find_keywords, split_top_level, unbracket};

use crate::expression::is_column_ref;

/// Node navigation methods of the OVER mini-language
const NAVIGATION_METHODS: &[&str] = &[
    "All",
    "AllPrevious",
    "AllNext",
    "Previous",
    "Next",
    "PreviousPeriod",
    "NextPeriod",
    "ParallelPeriod",
    "LastPeriods",
    "Parent",
    "FirstNode",
    "LastNode",
    "NavigatePeriod",
];

/// What an OVER clause asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverContext {
    /// Aggregate per combination of these columns
    Partition(Vec<String>),
    /// Navigation method that is not translated
    Navigation(String),
    Unrecognized,
}

impl OverContext {
    /// Interpret the text inside `OVER (...)`
    pub fn parse(over: &str) -> Self {
        let over = over.trim();
        if over.is_empty() {
            return OverContext::Unrecognized;
        }

        if let Some(kw) = find_keywords(over, &["PARTITION BY"]).first() {
            let tail = &over[kw.end..];
            let end = find_keywords(tail, &["ORDER BY"])
                .first()
                .map_or(tail.len(), |m| m.start);
            return columns(split_top_level(&tail[..end], ','));
        }

        let calls = find_calls(over);
        if let Some(nav) = calls.iter().find(|call| is_navigation(call.name)) {
            return OverContext::Navigation(nav.name.to_string());
        }
        if let Some(call) = calls.first() {
            if call.start == 0
                && call.name.eq_ignore_ascii_case("Intersect")
                && call.end(over) == over.len()
            {
                return columns(split_top_level(call.arguments(over), ','));
            }
            return OverContext::Unrecognized;
        }
        columns(split_top_level(over, ','))
    }
}

fn columns(items: Vec<&str>) -> OverContext {
    if items.is_empty() || !items.iter().all(|item| is_column_ref(item)) {
        return OverContext::Unrecognized;
    }
    OverContext::Partition(items.into_iter().map(|i| unbracket(i).to_string()).collect())
}

fn is_navigation(name: &str) -> bool {
    NAVIGATION_METHODS
        .iter()
        .any(|method| method.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(cols: &[&str]) -> OverContext {
        OverContext::Partition(cols.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_partition_by() {
        assert_eq!(
            OverContext::parse("PARTITION BY Region, [Sales Year] ORDER BY [Date]"),
            partition(&["Region", "Sales Year"])
        );
    }

    #[test]
    fn test_column_lists() {
        assert_eq!(OverContext::parse("[Region]"), partition(&["Region"]));
        assert_eq!(
            OverContext::parse("Intersect([Region], [Year])"),
            partition(&["Region", "Year"])
        );
    }

    #[test]
    fn test_navigation() {
        assert_eq!(
            OverContext::parse("AllPrevious([Date])"),
            OverContext::Navigation("AllPrevious".to_string())
        );
        assert_eq!(
            OverContext::parse("Intersect([Region], Previous([Month]))"),
            OverContext::Navigation("Previous".to_string())
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(OverContext::parse(""), OverContext::Unrecognized);
        assert_eq!(OverContext::parse("[A] + 1"), OverContext::Unrecognized);
        assert_eq!(OverContext::parse("Foo([A])"), OverContext::Unrecognized);
    }
}
