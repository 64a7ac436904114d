//! `CASE ... END` blocks.
//!
//! SQL and Spotfire share the same searched/simple case shape. Parsing is
//! keyword-aware: `WHEN`/`THEN`/`ELSE` inside literals, bracketed names or a
//! nested `CASE` never split the outer block.

use crate::dax;
use crate::rewrite::RewritePass;
use crate::text::{find_words, KeywordMatch};
use serde::Serialize;

const CASE_WORDS: &[&str] = &["CASE", "WHEN", "THEN", "ELSE", "END"];

/// One `WHEN condition THEN value` arm
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseArm {
    pub condition: String,
    pub value: String,
}

/// A parsed case block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseExpr {
    /// Operand of a simple case (`CASE x WHEN 1 THEN ...`)
    pub operand: Option<String>,
    pub arms: Vec<CaseArm>,
    pub default: Option<String>,
}

/// Byte spans `(start, end)` of the outermost `CASE ... END` blocks at any
/// parenthesis depth. Unterminated blocks are not reported.
pub fn case_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut nesting = 0usize;
    let mut start = 0;
    for word in find_words(text, &["CASE", "END"]) {
        if word.keyword == "CASE" {
            if nesting == 0 {
                start = word.start;
            }
            nesting += 1;
        } else if nesting > 0 {
            nesting -= 1;
            if nesting == 0 {
                spans.push((start, word.end));
            }
        }
    }
    spans
}

impl CaseExpr {
    /// Parse text that is exactly one `CASE ... END` block
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match case_spans(text).as_slice() {
            [(0, end)] if *end == text.len() => {}
            _ => return None,
        }

        // Keywords belonging to the outer block only
        let mut nesting = 0usize;
        let mut marks: Vec<KeywordMatch> = Vec::new();
        for word in find_words(text, CASE_WORDS) {
            match word.keyword {
                "CASE" => {
                    nesting += 1;
                    if nesting == 1 {
                        marks.push(word);
                    }
                }
                "END" => {
                    if nesting == 1 {
                        marks.push(word);
                    }
                    nesting = nesting.saturating_sub(1);
                }
                _ if nesting == 1 => marks.push(word),
                _ => {}
            }
        }
        if marks.len() < 4 {
            return None;
        }

        let segment = |from: &KeywordMatch, to: &KeywordMatch| text[from.end..to.start].trim();
        let operand = Some(segment(&marks[0], &marks[1]))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let mut arms = Vec::new();
        let mut default = None;
        let last = marks.len() - 1;
        let mut i = 1;
        while i < last {
            match marks[i].keyword {
                "WHEN" if default.is_none() => {
                    let then = marks.get(i + 1).filter(|m| m.keyword == "THEN")?;
                    let next = marks.get(i + 2)?;
                    let condition = segment(&marks[i], then);
                    let value = segment(then, next);
                    if condition.is_empty() || value.is_empty() {
                        return None;
                    }
                    arms.push(CaseArm {
                        condition: condition.to_string(),
                        value: value.to_string(),
                    });
                    i += 2;
                }
                "ELSE" if default.is_none() => {
                    let value = segment(&marks[i], &marks[i + 1]);
                    if value.is_empty() {
                        return None;
                    }
                    default = Some(value.to_string());
                    i += 1;
                }
                _ => return None,
            }
        }

        if arms.is_empty() {
            return None;
        }
        Some(Self {
            operand,
            arms,
            default,
        })
    }

    /// Render as DAX `SWITCH`, translating every part with `rewrite`.
    ///
    /// Searched cases switch on `TRUE()`; a missing default becomes `BLANK()`.
    pub fn to_switch(&self, rewrite: impl Fn(&str) -> String) -> String {
        let arms: Vec<(String, String)> = self
            .arms
            .iter()
            .map(|arm| (rewrite(&arm.condition), rewrite(&arm.value)))
            .collect();
        let default = self
            .default
            .as_deref()
            .map(&rewrite)
            .unwrap_or_else(|| dax::BLANK.to_string());
        let operand = self.operand.as_deref().map(&rewrite);
        dax::switch(operand.as_deref(), &arms, &default)
    }
}

/// `CASE ... END` → `SWITCH(...)`, nested blocks included; blocks that do
/// not parse are left as written
pub struct CaseExpressions;

impl RewritePass for CaseExpressions {
    fn name(&self) -> &'static str {
        "case_expressions"
    }

    fn apply(&self, input: &str) -> String {
        let spans = case_spans(input);
        if spans.is_empty() {
            return input.to_string();
        }
        let mut out = String::with_capacity(input.len() + 16);
        let mut pos = 0;
        for (start, end) in spans {
            out.push_str(&input[pos..start]);
            let block = &input[start..end];
            match CaseExpr::parse(block) {
                Some(case) => out.push_str(&case.to_switch(|part| self.apply(part))),
                None => out.push_str(block),
            }
            pos = end;
        }
        out.push_str(&input[pos..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_searched_case() {
        let case = CaseExpr::parse("Case When [a] > 1 Then 'big' When [a] > 0 Then 'small' Else 'none' End")
            .unwrap();
        assert_eq!(case.operand, None);
        assert_eq!(case.arms.len(), 2);
        assert_eq!(case.arms[1].condition, "[a] > 0");
        assert_eq!(case.default.as_deref(), Some("'none'"));
    }

    #[test]
    fn test_parse_simple_case_with_operand() {
        let case = CaseExpr::parse("CASE status WHEN 1 THEN 'open' END").unwrap();
        assert_eq!(case.operand.as_deref(), Some("status"));
        assert_eq!(case.arms[0].value, "'open'");
        assert_eq!(case.default, None);
    }

    #[test]
    fn test_keywords_inside_literals_and_brackets_do_not_split() {
        let case = CaseExpr::parse("Case When [Then Date] = 'else' Then 1 Else 2 End").unwrap();
        assert_eq!(case.arms[0].condition, "[Then Date] = 'else'");
        assert_eq!(case.default.as_deref(), Some("2"));
    }

    #[test]
    fn test_nested_case_stays_in_value() {
        let case =
            CaseExpr::parse("CASE WHEN a THEN CASE WHEN b THEN 1 ELSE 2 END ELSE 3 END").unwrap();
        assert_eq!(case.arms.len(), 1);
        assert_eq!(case.arms[0].value, "CASE WHEN b THEN 1 ELSE 2 END");
        assert_eq!(case.default.as_deref(), Some("3"));
    }

    #[test]
    fn test_malformed_case_is_rejected() {
        assert!(CaseExpr::parse("CASE WHEN a END").is_none());
        assert!(CaseExpr::parse("CASE ELSE 1 END").is_none());
        assert!(CaseExpr::parse("CASE WHEN a THEN 1").is_none());
        assert!(CaseExpr::parse("CASE WHEN a THEN 1 END + 1").is_none());
    }

    #[test]
    fn test_case_spans_any_depth() {
        let text = "ROUND(CASE WHEN a THEN 1 END, 2) + CASE WHEN b THEN 2 END";
        let spans = case_spans(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(&text[spans[0].0..spans[0].1], "CASE WHEN a THEN 1 END");
    }

    #[test]
    fn test_to_switch() {
        let case = CaseExpr::parse("CASE WHEN a THEN 1 END").unwrap();
        assert_eq!(
            case.to_switch(|s| s.to_uppercase()),
            "SWITCH(TRUE(), A, 1, BLANK())"
        );
        let simple = CaseExpr::parse("CASE s WHEN 1 THEN 'x' ELSE 'y' END").unwrap();
        assert_eq!(simple.to_switch(str::to_string), "SWITCH(s, 1, 'x', 'y')");
    }

    #[test]
    fn test_case_expressions_pass() {
        assert_eq!(
            CaseExpressions.apply("Case When [a] > 1 Then 'big' Else 'small' End & 'x'"),
            "SWITCH(TRUE(), [a] > 1, 'big', 'small') & 'x'"
        );
        assert_eq!(CaseExpressions.apply("Case When a End"), "Case When a End");
    }
}
