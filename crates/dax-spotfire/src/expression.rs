//! Parsed Spotfire expression model

use dax_core::CaseExpr;
use serde::Serialize;
use std::fmt;

/// One top-level Spotfire expression
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expression {
    Aggregation(Aggregation),
    Calculation(Calculation),
    Conditional(Conditional),
    /// Text that could not be classified (unbalanced parentheses)
    Unknown { original: String },
}

impl Expression {
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Aggregation(_) => ExpressionKind::Aggregation,
            Expression::Calculation(_) => ExpressionKind::Calculation,
            Expression::Conditional(_) => ExpressionKind::Conditional,
            Expression::Unknown { .. } => ExpressionKind::Unknown,
        }
    }

    /// Expression text as written, alias included
    pub fn original(&self) -> &str {
        match self {
            Expression::Aggregation(agg) => &agg.original,
            Expression::Calculation(calc) => &calc.original,
            Expression::Conditional(cond) => &cond.original,
            Expression::Unknown { original } => original,
        }
    }

    /// `as [Name]` alias, if any
    pub fn alias(&self) -> Option<&str> {
        match self {
            Expression::Aggregation(agg) => agg.alias.as_deref(),
            Expression::Calculation(calc) => calc.alias.as_deref(),
            Expression::Conditional(cond) => cond.alias.as_deref(),
            Expression::Unknown { .. } => None,
        }
    }
}

/// Expression classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpressionKind {
    Aggregation,
    Calculation,
    Conditional,
    Unknown,
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExpressionKind::Aggregation => "AGGREGATION",
            ExpressionKind::Calculation => "CALCULATION",
            ExpressionKind::Conditional => "CONDITIONAL",
            ExpressionKind::Unknown => "UNKNOWN",
        };
        f.write_str(text)
    }
}

/// An aggregate call such as `Sum([Sales]) OVER ([Region])`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregation {
    pub original: String,
    /// Expression without alias, OVER and WHERE parts
    pub expression: String,
    /// Aggregate function name as written
    pub function: String,
    /// Target column, brackets removed; the argument text when computed
    pub column: String,
    /// Full argument list of the aggregate call
    pub arguments: Vec<String>,
    /// Table the aggregate runs over
    pub table: String,
    /// Text of the OVER clause, parentheses removed
    pub over: Option<String>,
    /// Text of a WHERE condition
    pub filter: Option<String>,
    pub alias: Option<String>,
    /// The aggregate is part of a larger expression (`Sum([a]) / Count([b])`)
    pub compound: bool,
}

impl Aggregation {
    /// True when the first argument is a single column reference
    pub fn is_column_argument(&self) -> bool {
        self.arguments.first().is_some_and(|arg| is_column_ref(arg))
    }
}

/// Row-level expression without aggregates or conditionals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Calculation {
    pub original: String,
    pub expression: String,
    pub table: String,
    pub alias: Option<String>,
}

/// `If(...)` or `Case ... End`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditional {
    pub original: String,
    pub expression: String,
    pub form: ConditionalForm,
    pub table: String,
    pub alias: Option<String>,
}

/// Shape of a conditional expression
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum ConditionalForm {
    /// `If(condition, then[, else])`
    IfThenElse {
        condition: String,
        then: String,
        otherwise: Option<String>,
    },
    /// `Case [x] When ... Then ... Else ... End`
    Case(CaseExpr),
    /// Conditionals nested inside a larger expression
    Embedded,
    /// Conditional keywords with no usable shape
    Unrecognized,
}

/// `[Column]` or a bare identifier
pub fn is_column_ref(text: &str) -> bool {
    let text = text.trim();
    let bracketed = text.len() > 2
        && text.starts_with('[')
        && text.ends_with(']')
        && !text[1..text.len() - 1].contains(']');
    bracketed || dax_core::text::is_identifier(text)
}
