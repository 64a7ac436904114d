use super::*;
use crate::expression::ExpressionKind;

fn parse(source: &str) -> ParsedUnit<Expression> {
    SpotfireParser::new("Sales").parse(source)
}

fn single(source: &str) -> Expression {
    let unit = parse(source);
    assert_eq!(unit.items.len(), 1, "expected one expression in {source:?}");
    unit.items.into_iter().next().unwrap()
}

#[test]
fn test_aggregation_with_over_and_alias() {
    let Expression::Aggregation(agg) = single("Sum([Amount]) OVER ([Region]) as [Regional Sales]")
    else {
        panic!("expected an aggregation");
    };
    assert_eq!(agg.function, "Sum");
    assert_eq!(agg.column, "Amount");
    assert_eq!(agg.arguments, vec!["[Amount]".to_string()]);
    assert_eq!(agg.expression, "Sum([Amount])");
    assert_eq!(agg.over.as_deref(), Some("[Region]"));
    assert_eq!(agg.filter, None);
    assert_eq!(agg.alias.as_deref(), Some("Regional Sales"));
    assert_eq!(agg.table, "Sales");
    assert!(!agg.compound);
}

#[test]
fn test_aggregation_with_where() {
    let Expression::Aggregation(agg) = single("Avg([Price]) WHERE [Region] = 'West'") else {
        panic!("expected an aggregation");
    };
    assert_eq!(agg.expression, "Avg([Price])");
    assert_eq!(agg.filter.as_deref(), Some("[Region] = 'West'"));
    assert_eq!(agg.over, None);
}

#[test]
fn test_compound_aggregation() {
    let Expression::Aggregation(agg) = single("Sum([Profit]) / Sum([Revenue])") else {
        panic!("expected an aggregation");
    };
    assert!(agg.compound);
    assert_eq!(agg.function, "Sum");
    assert_eq!(agg.column, "Profit");
}

#[test]
fn test_aggregation_wins_over_conditional() {
    let expression = single("If(Sum([Sales]) > 100, 1, 0)");
    assert_eq!(expression.kind(), ExpressionKind::Aggregation);
}

#[test]
fn test_wrapped_lines_form_one_expression() {
    let unit = parse("-- totals\n\nSum(\n  [Amount]\n)\n[Price] * [Qty] as [Total]");
    assert_eq!(unit.items.len(), 2);
    assert_eq!(unit.items[0].original(), "Sum( [Amount] )");
    let Expression::Calculation(calc) = &unit.items[1] else {
        panic!("expected a calculation");
    };
    assert_eq!(calc.expression, "[Price] * [Qty]");
    assert_eq!(calc.alias.as_deref(), Some("Total"));
    assert!(!unit.has_errors());
}

#[test]
fn test_if_forms() {
    let Expression::Conditional(cond) = single("If([Sales] > 100, \"High\", \"Low\")") else {
        panic!("expected a conditional");
    };
    assert_eq!(
        cond.form,
        ConditionalForm::IfThenElse {
            condition: "[Sales] > 100".to_string(),
            then: "\"High\"".to_string(),
            otherwise: Some("\"Low\"".to_string()),
        }
    );

    let Expression::Conditional(cond) = single("If([Flag], 1)") else {
        panic!("expected a conditional");
    };
    assert!(matches!(
        cond.form,
        ConditionalForm::IfThenElse { otherwise: None, .. }
    ));
}

#[test]
fn test_case_forms() {
    let Expression::Conditional(cond) =
        single("Case When [Score] >= 90 Then 'A' When [Score] >= 80 Then 'B' Else 'C' End")
    else {
        panic!("expected a conditional");
    };
    let ConditionalForm::Case(case) = &cond.form else {
        panic!("expected a case form");
    };
    assert_eq!(case.operand, None);
    assert_eq!(case.arms.len(), 2);
    assert_eq!(case.default.as_deref(), Some("'C'"));

    let Expression::Conditional(cond) = single("[Base] + If([Bonus] > 0, [Bonus], 0)") else {
        panic!("expected a conditional");
    };
    assert_eq!(cond.form, ConditionalForm::Embedded);
}

#[test]
fn test_malformed_conditionals_are_reported() {
    let unit = parse("If([x] > 1)\nCase When [x] > 1 Then 1");
    assert_eq!(unit.items.len(), 2);
    for item in &unit.items {
        let Expression::Conditional(cond) = item else {
            panic!("expected a conditional");
        };
        assert_eq!(cond.form, ConditionalForm::Unrecognized);
    }
    assert_eq!(unit.parse_errors.len(), 2);
    assert!(unit.parse_errors[0].starts_with("[SF003] Expression 1"));
    assert!(unit.parse_errors[1].starts_with("[SF003] Expression 2"));
}

#[test]
fn test_unbalanced_expression_is_unknown() {
    let unit = parse("Sum([x]");
    assert_eq!(unit.items.len(), 1);
    assert_eq!(unit.items[0].kind(), ExpressionKind::Unknown);
    assert_eq!(unit.parse_errors.len(), 1);
    assert!(unit.parse_errors[0].contains("SF001"));
    assert!(!unit.suggestions.is_empty());
}

#[test]
fn test_empty_source() {
    let unit = parse("  \n-- only a comment\n");
    assert!(unit.items.is_empty());
    assert!(!unit.has_errors());
}

#[test]
fn test_split_alias() {
    assert_eq!(split_alias("[a] + 1 as [b]"), ("[a] + 1", Some("b".to_string())));
    assert_eq!(split_alias("Sum([x]) as Total"), ("Sum([x]) as Total", None));
    assert_eq!(split_alias("[a] as [b] + [c]"), ("[a] as [b] + [c]", None));
    assert_eq!(split_alias("'x as [y]'"), ("'x as [y]'", None));
}

#[test]
fn test_warnings_attached() {
    let unit = parse("Rank([Sales], \"desc\")");
    assert_eq!(unit.warnings, vec![crate::validator::RANKING.to_string()]);
}
