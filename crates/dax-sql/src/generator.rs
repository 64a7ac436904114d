//! DAX generation for parsed SQL.
//!
//! A SELECT with aggregates becomes one measure per aggregated column; any
//! other SELECT becomes one calculated column per select-list entry.
//! Statements DAX cannot express turn into comment lines.

use dax_core::dax;
use dax_core::{
    DaxGenerator, DaxOutput, DialectMappings, GenerateError, GenerateResult, ParsedUnit,
    RewritePipeline,
};

use crate::mapping::sql_mappings;
use crate::passes::{calculation_pipeline, filter_pipeline, TableScope};
use crate::statement::{is_column_reference, SelectColumn, SelectStatement, Statement};

/// Default name of unaliased computed columns
const CALCULATED_COLUMN: &str = "CalculatedColumn";

/// Emits measures and calculated columns for SQL statements
pub struct SqlGenerator {
    mappings: &'static DialectMappings,
    default_table: String,
}

impl SqlGenerator {
    /// Generator using `default_table` when a statement names no table
    pub fn new(default_table: impl Into<String>) -> Self {
        Self {
            mappings: sql_mappings(),
            default_table: default_table.into(),
        }
    }

    fn select(
        &self,
        index: usize,
        select: &SelectStatement,
        output: &mut DaxOutput,
    ) -> GenerateResult<String> {
        let scope = TableScope::for_select(select, &self.default_table);
        if select.primary_table().is_none() {
            output.note(format!(
                "No FROM table found; using '{}' as the table name",
                self.default_table
            ));
        }
        if !select.joins.is_empty() {
            output.note("JOINs are not translated; define relationships between the joined tables in the data model");
        }
        if select.has_aggregation && !select.group_by.is_empty() {
            output.note("GROUP BY is handled by filter context in DAX; the measures aggregate over whatever grouping the report applies");
        }
        if select.having.is_some() {
            output.note("HAVING clauses are not translated; filter the measure result in the report or wrap it in an IF");
        }
        if !select.order_by.is_empty() {
            output.note("ORDER BY has no meaning for measures and calculated columns and was ignored");
        }

        if select.has_aggregation {
            self.measures(index, select, &scope, output)
        } else {
            Ok(self.calculated_columns(select, &scope, output))
        }
    }

    fn measures(
        &self,
        index: usize,
        select: &SelectStatement,
        scope: &TableScope,
        output: &mut DaxOutput,
    ) -> GenerateResult<String> {
        let calculation = calculation_pipeline(scope, self.mappings);
        let filter = select.where_clause.as_deref().map(|predicate| {
            let predicate = filter_pipeline(scope, self.mappings).run(predicate);
            dax::filter(scope.primary(), &predicate)
        });

        let mut measures = Vec::new();
        for column in &select.columns {
            if !column.is_aggregation {
                output.note(format!(
                    "Non-aggregated column '{}' is skipped in a measure; it belongs to the grouping",
                    column.expression
                ));
                continue;
            }
            let function = column
                .function
                .as_deref()
                .ok_or_else(|| GenerateError::MalformedStatement {
                    index,
                    reason: format!("aggregated column '{}' has no function name", column.original),
                })?;
            let mapped = if column.distinct && function.eq_ignore_ascii_case("COUNT") {
                "DISTINCTCOUNT".to_string()
            } else {
                self.mappings.function(function).to_uppercase()
            };

            let name = column
                .alias
                .clone()
                .unwrap_or_else(|| derived_name(&mapped, &column.column));
            let body = self.measure_body(column, &mapped, scope, &calculation, filter.as_deref());
            measures.push(dax::assignment(&name, &body));
        }

        if measures.is_empty() {
            return Ok(dax::comment("No aggregated columns to convert"));
        }
        Ok(measures.join("\n"))
    }

    fn measure_body(
        &self,
        column: &SelectColumn,
        mapped: &str,
        scope: &TableScope,
        calculation: &RewritePipeline<'_>,
        filter: Option<&str>,
    ) -> String {
        let table = scope.table_for(column.qualifier.as_deref());
        let rows = filter.map_or_else(|| dax::table_ref(scope.primary()), str::to_string);

        if column.compound {
            let expression = calculation.run(&column.expression);
            return match filter {
                Some(filter) => format!("CALCULATE({expression}, {filter})"),
                None => expression,
            };
        }
        if column.column == "*" {
            return format!("COUNTROWS({rows})");
        }
        if !is_column_reference(&column.column) {
            let argument = calculation.run(&column.column);
            return match dax::iterator_function(mapped) {
                Some(iterator) => format!("{iterator}({rows}, {argument})"),
                None => match filter {
                    Some(filter) => format!("CALCULATE({mapped}({argument}), {filter})"),
                    None => format!("{mapped}({argument})"),
                },
            };
        }

        let reference = dax::column_ref(table, &column.column);
        match filter {
            Some(filter) => format!("{mapped}({reference}, {filter})"),
            None => format!("{mapped}({reference})"),
        }
    }

    fn calculated_columns(
        &self,
        select: &SelectStatement,
        scope: &TableScope,
        output: &mut DaxOutput,
    ) -> String {
        if select.columns.is_empty() {
            return dax::comment("No columns to convert");
        }
        if select.where_clause.is_some() {
            output.note("WHERE clauses do not apply to calculated columns; filter the table in the report instead");
        }

        let calculation = calculation_pipeline(scope, self.mappings);
        let mut unnamed = 0;
        let mut lines = Vec::new();
        for column in &select.columns {
            if is_star(&column.expression) {
                lines.push(dax::comment(&format!(
                    "{} cannot be converted; list the columns explicitly",
                    column.expression
                )));
                continue;
            }
            if column.is_computed() {
                let name = column.alias.clone().unwrap_or_else(|| {
                    unnamed += 1;
                    match unnamed {
                        1 => CALCULATED_COLUMN.to_string(),
                        n => format!("{CALCULATED_COLUMN}{n}"),
                    }
                });
                lines.push(dax::assignment(&name, &calculation.run(&column.expression)));
            } else {
                let name = column.alias.as_deref().unwrap_or(&column.column);
                let table = scope.table_for(column.qualifier.as_deref());
                lines.push(dax::assignment(name, &dax::column_ref(table, &column.column)));
            }
        }
        lines.join("\n")
    }
}

impl Default for SqlGenerator {
    fn default() -> Self {
        Self::new("Table")
    }
}

impl DaxGenerator for SqlGenerator {
    type Item = Statement;

    fn generate(&self, unit: &ParsedUnit<Statement>) -> GenerateResult<DaxOutput> {
        let mut output = DaxOutput::default();
        let mut blocks = Vec::with_capacity(unit.items.len());

        for (idx, statement) in unit.items.iter().enumerate() {
            let block = match statement {
                Statement::Select(select) => self.select(idx + 1, select, &mut output)?,
                Statement::Insert { .. } | Statement::Update { .. } | Statement::Delete { .. } => {
                    let kind = statement.kind();
                    log::debug!("statement {} is a {kind}; emitting placeholder", idx + 1);
                    output.note(format!("{kind} statements are not directly convertible to DAX"));
                    dax::comment(&format!("{kind} statements not supported in DAX"))
                }
                Statement::Unsupported { kind, .. } => {
                    log::debug!("statement {} has unsupported type {kind}", idx + 1);
                    output.note(format!("{kind} statements are not directly convertible to DAX"));
                    dax::comment(&format!("Unsupported statement type: {kind}"))
                }
            };
            blocks.push(block);
        }

        output.code = blocks.join("\n\n");
        Ok(output)
    }
}

/// Measure name for an unaliased aggregate: `SUM_amount`
fn derived_name(function: &str, column: &str) -> String {
    let mut name = String::with_capacity(function.len() + column.len() + 1);
    let source = if column == "*" { "rows" } else { column };
    for part in [function, source] {
        if !name.is_empty() {
            name.push('_');
        }
        let mut last_underscore = true;
        for ch in part.chars() {
            if ch.is_alphanumeric() {
                name.push(ch);
                last_underscore = false;
            } else if !last_underscore {
                name.push('_');
                last_underscore = true;
            }
        }
        while name.ends_with('_') {
            name.pop();
        }
    }
    name
}

fn is_star(expression: &str) -> bool {
    match expression.trim().strip_suffix('*') {
        Some(prefix) => prefix.is_empty() || prefix.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
