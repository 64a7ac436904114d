use super::*;
use dax_core::ObjectCategory;

#[test]
fn test_parse_select() {
    let unit = SqlParser::default().parse("SELECT a, b FROM t");
    assert!(!unit.has_errors());
    assert_eq!(unit.items.len(), 1);
    let Statement::Select(select) = &unit.items[0] else {
        panic!("expected a SELECT");
    };
    assert_eq!(select.tables, vec!["t"]);
    assert!(unit.objects.contains(ObjectCategory::Tables, "t"));
    assert!(unit.objects.contains(ObjectCategory::Columns, "a"));
    assert!(unit.objects.contains(ObjectCategory::Columns, "b"));
}

#[test]
fn test_statement_kinds() {
    let unit = SqlParser::default().parse(
        "SELECT a FROM t; INSERT INTO t (a) VALUES (1); UPDATE t SET a = 2; DELETE FROM t WHERE a = 1; DROP TABLE t",
    );
    let kinds: Vec<_> = unit.items.iter().map(Statement::kind).collect();
    assert_eq!(
        kinds,
        vec![
            StatementKind::Select,
            StatementKind::Insert,
            StatementKind::Update,
            StatementKind::Delete,
            StatementKind::Drop,
        ]
    );
    assert!(!unit.has_errors());
}

#[test]
fn test_empty_source() {
    let unit = SqlParser::default().parse("   \n");
    assert!(unit.items.is_empty());
    assert_eq!(unit.parse_errors, vec!["[S002] SQL is empty".to_string()]);
    assert_eq!(unit.suggestions, vec!["Enter valid source code".to_string()]);
}

#[test]
fn test_missing_from_is_a_parse_error() {
    let unit = SqlParser::default().parse("SELECT 1 + 1");
    assert_eq!(unit.items.len(), 1);
    assert_eq!(
        unit.parse_errors,
        vec!["[S004] Statement 1: FROM clause is missing".to_string()]
    );
    assert_eq!(
        unit.suggestions,
        vec!["Add a FROM clause naming the source table".to_string()]
    );
}

#[test]
fn test_unbalanced_parentheses() {
    let unit = SqlParser::default().parse("SELECT SUM(a FROM t");
    assert!(unit.parse_errors[0].starts_with("[S005] Statement 1"));
    assert!(unit.parse_errors[0].contains("1 unclosed"));

    let unit = SqlParser::default().parse("SELECT a) FROM t");
    assert!(unit.parse_errors[0].contains("unexpected ')'"));
}

#[test]
fn test_errors_do_not_stop_later_statements() {
    let unit = SqlParser::default().parse("SELECT 1; SELECT a FROM t");
    assert_eq!(unit.items.len(), 2);
    assert_eq!(unit.parse_errors.len(), 1);
}

#[test]
fn test_tokenizer_error_falls_back() {
    let unit = SqlParser::default().parse("SELECT a FROM t WHERE name = 'open");
    assert!(unit.parse_errors[0].starts_with("[S001]"));
    assert_eq!(unit.items.len(), 1);
}

#[test]
fn test_warnings_attached() {
    let unit = SqlParser::default().parse("SELECT * FROM t WHERE a IS NULL");
    assert_eq!(unit.warnings.len(), 2);
}

#[test]
fn test_with_statement_is_unsupported() {
    let unit = SqlParser::default().parse("WITH x AS (SELECT a FROM t) SELECT a FROM x");
    assert_eq!(unit.items[0].kind(), StatementKind::With);
    assert!(unit.warnings.iter().any(|w| w.starts_with("CTEs")));
}

#[test]
fn test_dialect_names() {
    assert_eq!(SqlParser::default().dialect_name(), "generic");
    assert_eq!(
        SqlParser::from_tokenizer_dialect(TokenizerDialect::MsSql).dialect_name(),
        "mssql"
    );
    assert_eq!(
        SqlParser::from_tokenizer_dialect(TokenizerDialect::Ansi).dialect_name(),
        "ansi"
    );
}
