use super::*;
use crate::parser::SqlParser;
use dax_core::DialectParser;

fn generate(sql: &str) -> DaxOutput {
    let unit = SqlParser::default().parse(sql);
    SqlGenerator::default().generate(&unit).unwrap()
}

#[test]
fn test_simple_measure() {
    let output = generate("SELECT SUM(amount) FROM Sales");
    assert_eq!(output.code, "SUM_amount = SUM(Sales[amount])");
}

#[test]
fn test_measure_with_filter_and_grouping() {
    let output = generate(
        "SELECT region, SUM(amount) AS total FROM Sales WHERE region = 'West' GROUP BY region",
    );
    assert_eq!(
        output.code,
        "total = SUM(Sales[amount], FILTER(Sales, Sales[region] = 'West'))"
    );
    assert!(output.notes.iter().any(|n| n.starts_with("GROUP BY")));
    assert!(output.notes.iter().any(|n| n.contains("'region' is skipped")));
}

#[test]
fn test_count_forms() {
    let output = generate("SELECT COUNT(*) AS orders, COUNT(DISTINCT customer_id) FROM Orders");
    assert_eq!(
        output.code,
        "orders = COUNTROWS(Orders)\nDISTINCTCOUNT_customer_id = DISTINCTCOUNT(Orders[customer_id])"
    );
}

#[test]
fn test_count_star_with_filter() {
    let output = generate("SELECT COUNT(*) FROM Orders WHERE status = 'open'");
    assert_eq!(
        output.code,
        "COUNT_rows = COUNTROWS(FILTER(Orders, Orders[status] = 'open'))"
    );
}

#[test]
fn test_isnull_in_filter() {
    let output = generate("SELECT SUM(amount) FROM Sales WHERE ISNULL(discount, 0) > 5");
    assert_eq!(
        output.code,
        "SUM_amount = SUM(Sales[amount], FILTER(Sales, IF(ISBLANK(Sales[discount]), 0, Sales[discount]) > 5))"
    );
}

#[test]
fn test_computed_argument_uses_iterator() {
    let output = generate("SELECT SUM(price * qty) AS revenue FROM Sales WHERE qty > 0");
    assert_eq!(
        output.code,
        "revenue = SUMX(FILTER(Sales, Sales[qty] > 0), Sales[price] * Sales[qty])"
    );
}

#[test]
fn test_compound_aggregate() {
    let output = generate("SELECT ROUND(SUM(amount), 2) AS total FROM Sales");
    assert_eq!(output.code, "total = ROUND(SUM(Sales[amount]), 2)");

    let output = generate("SELECT ROUND(AVG(amount), 2) AS avg_amount FROM Sales WHERE qty > 1");
    assert_eq!(
        output.code,
        "avg_amount = CALCULATE(ROUND(AVERAGE(Sales[amount]), 2), FILTER(Sales, Sales[qty] > 1))"
    );
}

#[test]
fn test_mapped_function_names() {
    let output = generate("SELECT AVG(price) FROM Products");
    assert_eq!(output.code, "AVERAGE_price = AVERAGE(Products[price])");
}

#[test]
fn test_qualified_aggregate_resolves_alias() {
    let output = generate("SELECT MAX(o.amount) AS biggest FROM Orders o");
    assert_eq!(output.code, "biggest = MAX(Orders[amount])");
}

#[test]
fn test_calculated_columns() {
    let output = generate(
        "SELECT o.id, o.amount * 1.1 AS gross, UPPER(c.name) FROM Orders o JOIN Customers c ON o.cid = c.id",
    );
    assert_eq!(
        output.code,
        "id = Orders[id]\ngross = Orders[amount] * 1.1\nCalculatedColumn = UPPER(Customers[name])"
    );
    assert!(output.notes.iter().any(|n| n.starts_with("JOINs")));
}

#[test]
fn test_default_names_are_numbered() {
    let output = generate("SELECT LEN(name), UPPER(city) FROM People");
    assert_eq!(
        output.code,
        "CalculatedColumn = LEN(People[name])\nCalculatedColumn2 = UPPER(People[city])"
    );
}

#[test]
fn test_alias_passthrough() {
    let output = generate("SELECT name AS customer_name FROM Customers");
    assert_eq!(output.code, "customer_name = Customers[name]");
}

#[test]
fn test_null_idioms_in_calculated_column() {
    let output = generate("SELECT ISNULL(discount, 0) AS disc FROM Sales");
    assert_eq!(
        output.code,
        "disc = IF(ISBLANK(Sales[discount]), 0, Sales[discount])"
    );
}

#[test]
fn test_default_table_when_from_missing() {
    let unit = SqlParser::default().parse("SELECT qty * 2 AS double_qty");
    let output = SqlGenerator::new("Sales").generate(&unit).unwrap();
    assert_eq!(output.code, "double_qty = Sales[qty] * 2");
    assert!(output.notes.iter().any(|n| n.contains("'Sales'")));
}

#[test]
fn test_unsupported_statements() {
    let output = generate("DELETE FROM t WHERE x = 1");
    assert_eq!(output.code, "-- DELETE statements not supported in DAX");

    let output = generate("INSERT INTO t VALUES (1); UPDATE t SET a = 1; DROP TABLE t");
    assert_eq!(
        output.code,
        "-- INSERT statements not supported in DAX\n\n-- UPDATE statements not supported in DAX\n\n-- Unsupported statement type: DROP"
    );
}

#[test]
fn test_select_star() {
    let output = generate("SELECT * FROM Sales");
    assert_eq!(output.code, "-- * cannot be converted; list the columns explicitly");
}

#[test]
fn test_statements_are_separated_by_blank_lines() {
    let output = generate("SELECT SUM(a) FROM t; SELECT b FROM t");
    assert_eq!(output.code, "SUM_a = SUM(t[a])\n\nb = t[b]");
}

#[test]
fn test_empty_select_list() {
    let unit = ParsedUnit {
        items: vec![Statement::Select(SelectStatement::default())],
        ..ParsedUnit::new()
    };
    let output = SqlGenerator::default().generate(&unit).unwrap();
    assert_eq!(output.code, "-- No columns to convert");
}

#[test]
fn test_aggregate_without_function_is_malformed() {
    let select = SelectStatement {
        original: "SELECT x FROM t".to_string(),
        columns: vec![SelectColumn {
            original: "x".to_string(),
            expression: "x".to_string(),
            column: "x".to_string(),
            is_aggregation: true,
            ..Default::default()
        }],
        tables: vec!["t".to_string()],
        has_aggregation: true,
        ..Default::default()
    };
    let unit = ParsedUnit {
        items: vec![Statement::Select(select)],
        ..ParsedUnit::new()
    };
    let err = SqlGenerator::default().generate(&unit).unwrap_err();
    assert!(matches!(err, GenerateError::MalformedStatement { index: 1, .. }));
}

#[test]
fn test_qualification_is_idempotent() {
    let unit = SqlParser::default().parse("SELECT Sales[amount] * 2 AS doubled FROM Sales");
    let output = SqlGenerator::default().generate(&unit).unwrap();
    assert_eq!(output.code, "doubled = Sales[amount] * 2");
}
