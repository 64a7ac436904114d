//! DAX generation for parsed Spotfire expressions.
//!
//! Aggregations become measures, with OVER partitions and WHERE conditions
//! turned into `FILTER` contexts. Calculations and conditionals become
//! calculated-column expressions.

use dax_core::dax;
use dax_core::rewrite::{BooleanOperators, BracketColumns, FunctionCalls, NullIdioms};
use dax_core::{
    CaseExpressions, DaxGenerator, DaxOutput, DialectMappings, GenerateError, GenerateResult,
    ParsedUnit, RewritePipeline,
};

use crate::expression::{Aggregation, Conditional, ConditionalForm, Expression};
use crate::mapping::{conversion_form, spotfire_mappings};
use crate::over::OverContext;

/// Ranking functions translated through `RANKX`
const RANKING_FUNCTIONS: &[&str] = &["Rank", "DenseRank", "RowId", "RowNumber", "NTile"];

/// Rewrite pipeline for expression text of `table`
pub fn expression_pipeline<'a>(table: &str, mappings: &'a DialectMappings) -> RewritePipeline<'a> {
    RewritePipeline::new()
        .with(CaseExpressions)
        .with(FunctionCalls::new(&mappings.functions).with_special_form(conversion_form(mappings)))
        .with(BracketColumns::new(table))
        .with(NullIdioms::new(&mappings.null_rules))
        .with(BooleanOperators)
}

/// Emits DAX for Spotfire expressions
pub struct SpotfireGenerator {
    mappings: &'static DialectMappings,
}

impl SpotfireGenerator {
    pub fn new() -> Self {
        Self {
            mappings: spotfire_mappings(),
        }
    }

    fn aggregation(
        &self,
        index: usize,
        agg: &Aggregation,
        output: &mut DaxOutput,
    ) -> GenerateResult<String> {
        if agg.function.trim().is_empty() {
            return Err(GenerateError::MalformedExpression {
                index,
                reason: "aggregation has no function name".to_string(),
            });
        }
        let pipeline = expression_pipeline(&agg.table, self.mappings);
        let context = self.over_context(agg, output).or_else(|| {
            agg.filter
                .as_deref()
                .map(|condition| dax::filter(&agg.table, &pipeline.run(condition)))
        });

        if agg.compound {
            let expression = pipeline.run(&agg.expression);
            return Ok(match context {
                Some(context) => format!("CALCULATE({expression}, {context})"),
                None => expression,
            });
        }

        let mapped = self.mappings.function(&agg.function).to_uppercase();
        if is_ranking(&agg.function) {
            return Ok(rank(agg, &pipeline, context, output));
        }

        let rows = context.clone().unwrap_or_else(|| dax::table_ref(&agg.table));
        let Some(first) = agg.arguments.first() else {
            if mapped == "COUNT" {
                return Ok(format!("COUNTROWS({rows})"));
            }
            return Ok(dax::comment(&format!("{}() needs an argument", agg.function)));
        };
        if first == "*" {
            return Ok(format!("COUNTROWS({rows})"));
        }

        if !agg.is_column_argument() {
            let argument = pipeline.run(first);
            return Ok(match dax::iterator_function(&mapped) {
                Some(iterator) => format!("{iterator}({rows}, {argument})"),
                None => match context {
                    Some(context) => format!("CALCULATE({mapped}({argument}), {context})"),
                    None => format!("{mapped}({argument})"),
                },
            });
        }

        let mut arguments = vec![dax::column_ref(&agg.table, &agg.column)];
        arguments.extend(agg.arguments[1..].iter().map(|arg| pipeline.run(arg)));
        arguments.extend(context);
        Ok(format!("{mapped}({})", arguments.join(", ")))
    }

    /// `FILTER` context for a partitioning OVER clause; other OVER clauses
    /// are noted and dropped
    fn over_context(&self, agg: &Aggregation, output: &mut DaxOutput) -> Option<String> {
        let over = agg.over.as_deref()?;
        match OverContext::parse(over) {
            OverContext::Partition(columns) => Some(partition_filter(&agg.table, &columns)),
            OverContext::Navigation(method) => {
                output.note(format!(
                    "OVER navigation method '{method}' has no direct DAX equivalent and was not translated"
                ));
                None
            }
            OverContext::Unrecognized => {
                output.note(format!("OVER ({over}) was not translated"));
                None
            }
        }
    }

    fn conditional(&self, cond: &Conditional) -> String {
        let pipeline = expression_pipeline(&cond.table, self.mappings);
        match &cond.form {
            ConditionalForm::IfThenElse {
                condition,
                then,
                otherwise,
            } => {
                let mut parts = vec![pipeline.run(condition), pipeline.run(then)];
                parts.extend(otherwise.as_deref().map(|o| pipeline.run(o)));
                format!("IF({})", parts.join(", "))
            }
            ConditionalForm::Case(case) => case.to_switch(|part| pipeline.run(part)),
            ConditionalForm::Embedded => pipeline.run(&cond.expression),
            ConditionalForm::Unrecognized => dax::comment("Unsupported conditional type"),
        }
    }
}

impl Default for SpotfireGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DaxGenerator for SpotfireGenerator {
    type Item = Expression;

    fn generate(&self, unit: &ParsedUnit<Expression>) -> GenerateResult<DaxOutput> {
        let mut output = DaxOutput::default();
        let mut blocks = Vec::with_capacity(unit.items.len());

        for (idx, expression) in unit.items.iter().enumerate() {
            let code = match expression {
                Expression::Aggregation(agg) => self.aggregation(idx + 1, agg, &mut output)?,
                Expression::Calculation(calc) => {
                    expression_pipeline(&calc.table, self.mappings).run(&calc.expression)
                }
                Expression::Conditional(cond) => self.conditional(cond),
                Expression::Unknown { .. } => {
                    log::debug!("expression {} could not be classified", idx + 1);
                    output.note(format!(
                        "Expression {} could not be classified and was not converted",
                        idx + 1
                    ));
                    dax::comment(&format!("Unsupported expression type: {}", expression.kind()))
                }
            };
            let block = match expression.alias() {
                Some(alias) if !code.starts_with("--") => dax::assignment(alias, &code),
                _ => code,
            };
            blocks.push(block);
        }

        output.code = blocks.join("\n\n");
        Ok(output)
    }
}

/// `FILTER(T, T[a] = EARLIER(T[a]) && ...)`
fn partition_filter(table: &str, columns: &[String]) -> String {
    let predicate = columns
        .iter()
        .map(|column| {
            let reference = dax::column_ref(table, column);
            format!("{reference} = EARLIER({reference})")
        })
        .collect::<Vec<_>>()
        .join(" && ");
    dax::filter(table, &predicate)
}

fn is_ranking(function: &str) -> bool {
    RANKING_FUNCTIONS
        .iter()
        .any(|name| name.eq_ignore_ascii_case(function))
}

/// `RANKX` over the whole table, or over the partition when one is given.
/// Spotfire ranks ascending unless told `"desc"`.
fn rank(
    agg: &Aggregation,
    pipeline: &RewritePipeline<'_>,
    context: Option<String>,
    output: &mut DaxOutput,
) -> String {
    let rows = context.unwrap_or_else(|| format!("ALL({})", dax::table_ref(&agg.table)));
    let value = match agg.arguments.first() {
        Some(_) if agg.is_column_argument() => dax::column_ref(&agg.table, &agg.column),
        Some(first) => pipeline.run(first),
        None => {
            output.note(format!(
                "{}() without arguments ranks by row order; supply a column to rank by",
                agg.function
            ));
            return dax::comment(&format!("{}() needs a column to rank by", agg.function));
        }
    };

    let descending = agg.arguments[1..].iter().any(|arg| {
        arg.trim_matches(|c| c == '"' || c == '\'')
            .eq_ignore_ascii_case("desc")
    });
    let order = if descending { "DESC" } else { "ASC" };
    let dense = agg.function.eq_ignore_ascii_case("DenseRank");
    if !dense && !agg.function.eq_ignore_ascii_case("Rank") {
        output.note(format!("{} is approximated with RANKX", agg.function));
    }

    let mut call = format!("RANKX({rows}, {value}, , {order}");
    if dense {
        call.push_str(", Dense");
    }
    call.push(')');
    call
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
