//! End-to-end conversion tests through the public engine

use dax_convert::{convert, validate, Engine, SpotfireConverter, SqlConverter};
use dax_core::{ConverterConfig, ObjectCategory, SourceDialect};
use dax_spotfire::{spotfire_mappings, AGGREGATE_FUNCTIONS};
use dax_sql::select::is_aggregate;
use dax_sql::sql_mappings;

fn sales_config() -> ConverterConfig {
    ConverterConfig::default()
        .with_default_table("Sales")
        .unwrap()
}

#[test]
fn test_qualification_is_idempotent() {
    let spotfire = SpotfireConverter::from_config(&sales_config());
    let once = spotfire.convert("[Amount] * 2").unwrap().dax_code;
    assert_eq!(once, "Sales[Amount] * 2");
    let twice = spotfire.convert(&once).unwrap().dax_code;
    assert_eq!(twice, once);

    let sql = convert("SELECT Sales[amount] * 2 AS doubled FROM Sales", SourceDialect::Sql)
        .unwrap();
    assert_eq!(sql.dax_code, "doubled = Sales[amount] * 2");
}

#[test]
fn test_object_identification() {
    let result = convert("SELECT a, b FROM t", SourceDialect::Sql).unwrap();
    let objects = &result.objects_identified;
    assert_eq!(objects.tables.iter().collect::<Vec<_>>(), vec!["t"]);
    assert!(objects.contains(ObjectCategory::Columns, "a"));
    assert!(objects.contains(ObjectCategory::Columns, "b"));
}

#[test]
fn test_sql_aggregate_mapping_totality() {
    let engine = Engine::default();
    for (key, mapped) in sql_mappings().functions.entries() {
        if !is_aggregate(key) {
            continue;
        }
        let source = format!("SELECT {key}(amount) FROM Sales");
        let result = engine.convert(&source, SourceDialect::Sql).unwrap();
        let expected = format!("{mapped}(Sales[amount])");
        assert!(
            result.dax_code.contains(&expected),
            "{source} gave {}",
            result.dax_code
        );
    }
}

#[test]
fn test_spotfire_aggregate_mapping_totality() {
    let spotfire = SpotfireConverter::from_config(&sales_config());
    for function in AGGREGATE_FUNCTIONS {
        let mapped = spotfire_mappings().function(function);
        let source = format!("{function}([x])");
        let code = spotfire.convert(&source).unwrap().dax_code;
        if mapped == "RANKX" {
            assert!(code.starts_with("RANKX(") && code.contains("Sales[x]"), "{code}");
        } else {
            assert!(code.contains(&format!("{mapped}(Sales[x]")), "{source} gave {code}");
        }
    }
}

#[test]
fn test_unsupported_statement_passthrough() {
    let result = convert("DELETE FROM t WHERE x=1", SourceDialect::Sql).unwrap();
    assert_eq!(result.dax_code, "-- DELETE statements not supported in DAX");
    assert_eq!(result.dax_code.lines().count(), 1);
}

#[test]
fn test_null_idioms() {
    let sql = convert(
        "SELECT SUM(amount) AS total FROM Sales WHERE note IS NULL",
        SourceDialect::Sql,
    )
    .unwrap();
    assert_eq!(
        sql.dax_code,
        "total = SUM(Sales[amount], FILTER(Sales, ISBLANK(Sales[note])))"
    );

    let coalesced = convert(
        "SELECT SUM(amount) FROM Sales WHERE ISNULL(discount, 0) > 5",
        SourceDialect::Sql,
    )
    .unwrap();
    assert!(coalesced.dax_code.contains("IF(ISBLANK(Sales[discount]), 0, Sales[discount]) > 5"));

    let spotfire = convert("IsNull([x])", SourceDialect::Spotfire).unwrap();
    assert_eq!(spotfire.dax_code, "ISBLANK(Table[x])");
}

#[test]
fn test_validate_empty_input() {
    for dialect in [SourceDialect::Sql, SourceDialect::Spotfire] {
        let result = validate("", dialect);
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Code cannot be empty".to_string()]);
        assert!(!result.suggestions.is_empty());
    }
}

#[test]
fn test_multi_line_spotfire_expression() {
    let result = convert("Sum([Sales] *\n[Quantity])", SourceDialect::Spotfire).unwrap();
    assert_eq!(result.dax_code, "SUMX(Table, Table[Sales] * Table[Quantity])");
    assert!(result.warnings.is_empty());
}

#[test]
fn test_mixed_script_degrades_per_statement() {
    let sql = SqlConverter::from_config(&sales_config());
    let result = sql
        .convert("SELECT SUM(amount) FROM Sales;\nUPDATE Sales SET amount = 0;\nSELECT name FROM Customers")
        .unwrap();
    assert_eq!(
        result.dax_code,
        "SUM_amount = SUM(Sales[amount])\n\n-- UPDATE statements not supported in DAX\n\nname = Customers[name]"
    );
    assert!(result
        .notes
        .iter()
        .any(|note| note.starts_with("UPDATE statements")));
}

#[test]
fn test_results_serialize_in_camel_case() {
    let result = convert("Sum([x]) as [Total]", SourceDialect::Spotfire).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["daxCode"], "Total = SUM(Table[x])");
    assert_eq!(json["objectsIdentified"]["aliases"][0], "Total");
}
