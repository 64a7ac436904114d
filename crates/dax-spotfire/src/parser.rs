//! Spotfire expression parser.
//!
//! Each expression is classified by priority: any aggregate call makes an
//! aggregation, otherwise a conditional keyword makes a conditional,
//! otherwise it is a row-level calculation.

use dax_core::case::case_spans;
use dax_core::text::{
    closing_paren, contains_word, find_calls, find_keywords, split_top_level, unbracket,
    KeywordMatch,
};
use dax_core::{CaseExpr, DialectParser, ParsedUnit};

use crate::error::SpotfireError;
use crate::expression::{
    is_column_ref, Aggregation, Calculation, Conditional, ConditionalForm, Expression,
};
use crate::objects::identify_objects;
use crate::splitter::{split_expressions, RawExpression};
use crate::validator::advisory_warnings;

/// Aggregate functions of the expression language
pub const AGGREGATE_FUNCTIONS: &[&str] = &[
    "Sum",
    "Count",
    "CountDistinct",
    "Avg",
    "Min",
    "Max",
    "Median",
    "StDev",
    "StDevP",
    "Var",
    "VarP",
    "First",
    "Last",
    "Percentile",
    "Rank",
    "DenseRank",
    "RowId",
    "RowNumber",
    "NTile",
];

const CONDITIONAL_KEYWORDS: &[&str] = &["If", "Case", "When", "Then", "Else", "End"];

/// True when `name` is an aggregate function (case-insensitive)
pub fn is_aggregate(name: &str) -> bool {
    AGGREGATE_FUNCTIONS
        .iter()
        .any(|agg| agg.eq_ignore_ascii_case(name))
}

/// Parser for Spotfire custom expressions
pub struct SpotfireParser {
    default_table: String,
}

impl SpotfireParser {
    /// Parser attributing every column to `default_table`; expressions never
    /// name their table
    pub fn new(default_table: impl Into<String>) -> Self {
        Self {
            default_table: default_table.into(),
        }
    }

    fn parse_expression(
        &self,
        index: usize,
        raw: &RawExpression,
        unit: &mut ParsedUnit<Expression>,
    ) -> Expression {
        let original = raw.text.clone();
        if !raw.balanced {
            return Expression::Unknown { original };
        }
        let (body, alias) = split_alias(&raw.text);
        let table = self.default_table.clone();

        if find_calls(body).iter().any(|call| is_aggregate(call.name)) {
            if let Some(aggregation) = parse_aggregation(&original, body, alias.clone(), &table) {
                return Expression::Aggregation(aggregation);
            }
        } else if CONDITIONAL_KEYWORDS.iter().any(|kw| contains_word(body, kw)) {
            let form = match conditional_form(body) {
                Ok(form) => form,
                Err(reason) => {
                    let err = SpotfireError::MalformedConditional {
                        expression: index,
                        reason,
                    };
                    unit.error(err.to_string(), err.suggestion());
                    ConditionalForm::Unrecognized
                }
            };
            return Expression::Conditional(Conditional {
                original,
                expression: body.to_string(),
                form,
                table,
                alias,
            });
        }

        Expression::Calculation(Calculation {
            original,
            expression: body.to_string(),
            table,
            alias,
        })
    }
}

impl Default for SpotfireParser {
    fn default() -> Self {
        Self::new("Table")
    }
}

impl DialectParser for SpotfireParser {
    type Item = Expression;

    fn parse(&self, source: &str) -> ParsedUnit<Expression> {
        let mut unit = ParsedUnit::new();
        let split = split_expressions(source);
        for err in &split.errors {
            unit.error(err.to_string(), err.suggestion());
        }
        for (idx, raw) in split.expressions.iter().enumerate() {
            let expression = self.parse_expression(idx + 1, raw, &mut unit);
            unit.items.push(expression);
        }

        unit.objects = identify_objects(&unit.items);
        unit.warnings = advisory_warnings(source);
        log::debug!(
            "parsed {} Spotfire expression(s), {} error(s)",
            unit.items.len(),
            unit.parse_errors.len()
        );
        unit
    }
}

/// Split `expr as [Name]` into expression and alias. Only the last
/// top-level `as` followed by exactly one bracketed name counts.
pub fn split_alias(text: &str) -> (&str, Option<String>) {
    let text = text.trim();
    if let Some(kw) = find_keywords(text, &["AS"]).last() {
        let name = text[kw.end..].trim();
        let inner = unbracket(name);
        if name.starts_with('[') && inner.len() + 2 == name.len() && !inner.trim().is_empty() {
            return (text[..kw.start].trim(), Some(inner.to_string()));
        }
    }
    (text, None)
}

fn parse_aggregation(
    original: &str,
    body: &str,
    alias: Option<String>,
    table: &str,
) -> Option<Aggregation> {
    let marks = find_keywords(body, &["OVER", "WHERE"]);
    let over_mark = marks.iter().find(|m| m.keyword == "OVER");
    let where_mark = marks.iter().find(|m| m.keyword == "WHERE");
    let core_end = marks.first().map_or(body.len(), |m| m.start);
    let core = body[..core_end].trim();

    let call = find_calls(core).into_iter().find(|c| is_aggregate(c.name))?;
    let arguments: Vec<String> = split_top_level(call.arguments(core), ',')
        .into_iter()
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect();
    let column = match arguments.first() {
        Some(first) if is_column_ref(first) => unbracket(first).to_string(),
        Some(first) => first.clone(),
        None => String::new(),
    };

    Some(Aggregation {
        original: original.to_string(),
        expression: core.to_string(),
        function: call.name.to_string(),
        column,
        table: table.to_string(),
        over: over_mark.and_then(|m| over_text(body, m, where_mark)),
        filter: where_mark.and_then(|m| filter_text(body, m, over_mark)),
        alias,
        compound: call.start != 0 || call.end(core) != core.len(),
        arguments,
    })
}

/// Text of the OVER clause: the parenthesised group, or the rest of the
/// expression up to a later WHERE
fn over_text(body: &str, over: &KeywordMatch, where_mark: Option<&KeywordMatch>) -> Option<String> {
    let rest = &body[over.end..];
    let offset = over.end + (rest.len() - rest.trim_start().len());
    let text = if body[offset..].starts_with('(') {
        let close = closing_paren(body, offset)?;
        &body[offset + 1..close]
    } else {
        let end = where_mark
            .filter(|w| w.start > over.start)
            .map_or(body.len(), |w| w.start);
        &body[offset..end]
    };
    Some(text.trim().to_string()).filter(|t| !t.is_empty())
}

/// Text of the WHERE condition, up to a later OVER
fn filter_text(body: &str, mark: &KeywordMatch, over: Option<&KeywordMatch>) -> Option<String> {
    let end = over
        .filter(|o| o.start > mark.start)
        .map_or(body.len(), |o| o.start);
    Some(body[mark.end..end].trim().to_string()).filter(|t| !t.is_empty())
}

/// Decide the shape of a conditional; `Err` carries why it is malformed
fn conditional_form(body: &str) -> Result<ConditionalForm, String> {
    if let Some(call) = find_calls(body).first() {
        if call.start == 0 && call.name.eq_ignore_ascii_case("If") && call.end(body) == body.len()
        {
            let args = split_top_level(call.arguments(body), ',');
            if args.iter().any(|arg| arg.is_empty()) {
                return Err("If has an empty argument".to_string());
            }
            return match args.as_slice() {
                [condition, then] => Ok(ConditionalForm::IfThenElse {
                    condition: condition.to_string(),
                    then: then.to_string(),
                    otherwise: None,
                }),
                [condition, then, otherwise] => Ok(ConditionalForm::IfThenElse {
                    condition: condition.to_string(),
                    then: then.to_string(),
                    otherwise: Some(otherwise.to_string()),
                }),
                _ => Err(format!("If takes 2 or 3 arguments, found {}", args.len())),
            };
        }
    }

    let starts_with_case = find_keywords(body, &["CASE"])
        .first()
        .is_some_and(|kw| kw.start == 0);
    if starts_with_case {
        return match case_spans(body).as_slice() {
            [(0, end)] if *end == body.len() => CaseExpr::parse(body)
                .map(ConditionalForm::Case)
                .ok_or_else(|| "Case needs When ... Then ... arms before End".to_string()),
            [] => Err("Case without End".to_string()),
            _ => Ok(ConditionalForm::Embedded),
        };
    }
    Ok(ConditionalForm::Embedded)
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
