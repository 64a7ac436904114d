use super::*;

#[test]
fn test_classify_by_leading_keyword() {
    assert_eq!(StatementKind::classify("select a from t"), StatementKind::Select);
    assert_eq!(StatementKind::classify("  (SELECT a FROM t)"), StatementKind::Select);
    assert_eq!(StatementKind::classify("INSERT INTO t VALUES (1)"), StatementKind::Insert);
    assert_eq!(StatementKind::classify("WITH x AS (SELECT 1) SELECT * FROM x"), StatementKind::With);
    assert_eq!(StatementKind::classify("EXEC proc"), StatementKind::Unknown);
}

#[test]
fn test_column_reference_shapes() {
    assert!(is_column_reference("amount"));
    assert!(is_column_reference("o.amount"));
    assert!(is_column_reference("dbo.orders.amount"));
    assert!(is_column_reference("[Order Date]"));
    assert!(is_column_reference("o.[Order Date]"));
    assert!(!is_column_reference("price * qty"));
    assert!(!is_column_reference("UPPER(name)"));
    assert!(!is_column_reference("NULL"));
    assert!(!is_column_reference("42"));
}

#[test]
fn test_is_computed() {
    let plain = SelectColumn {
        expression: "c.name".to_string(),
        ..Default::default()
    };
    let computed = SelectColumn {
        expression: "price * qty".to_string(),
        ..Default::default()
    };
    assert!(!plain.is_computed());
    assert!(computed.is_computed());
}

#[test]
fn test_split_qualified_respects_delimiters() {
    assert_eq!(split_qualified("s.[a.b]"), vec!["s", "[a.b]"]);
    assert_eq!(undelimit("[a.b]"), "a.b");
    assert_eq!(undelimit("\"Col\""), "Col");
}

#[test]
fn test_join_kind_from_keyword() {
    assert_eq!(JoinKind::from_keyword("LEFT OUTER JOIN"), JoinKind::Left);
    assert_eq!(JoinKind::from_keyword("join"), JoinKind::Inner);
    assert_eq!(JoinKind::Full.to_string(), "FULL JOIN");
}

#[test]
fn test_statement_serializes_with_type_tag() {
    let stmt = Statement::Delete {
        original: "DELETE FROM t".to_string(),
    };
    let json = serde_json::to_value(&stmt).unwrap();
    assert_eq!(json["type"], "delete");
    assert_eq!(stmt.kind(), StatementKind::Delete);
}
