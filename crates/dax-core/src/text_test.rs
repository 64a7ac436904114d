use super::*;

#[test]
fn test_is_identifier() {
    assert!(is_identifier("amount"));
    assert!(is_identifier("_total2"));
    assert!(!is_identifier("2total"));
    assert!(!is_identifier("t.amount"));
    assert!(!is_identifier(""));
}

#[test]
fn test_split_top_level_ignores_nested_commas() {
    let parts = split_top_level("a, SUM(b, c), 'x,y', [d,e]", ',');
    assert_eq!(parts, vec!["a", "SUM(b, c)", "'x,y'", "[d,e]"]);
}

#[test]
fn test_split_top_level_keeps_empty_pieces() {
    assert_eq!(split_top_level("a,,b", ','), vec!["a", "", "b"]);
}

#[test]
fn test_paren_balance() {
    assert_eq!(paren_balance("Sum([x]"), (1, 0));
    assert_eq!(paren_balance("f(g(x))"), (0, 0));
    assert_eq!(paren_balance(") + ("), (0, -1));
    // Parentheses inside literals and brackets do not count
    assert_eq!(paren_balance("[Sales (USD)] + '('"), (0, 0));
}

#[test]
fn test_closing_paren() {
    let text = "IF(a, f(b), c) + 1";
    assert_eq!(closing_paren(text, 2), Some(13));
    assert_eq!(closing_paren("f(a", 1), None);
    assert_eq!(closing_paren("abc", 0), None);
}

#[test]
fn test_find_calls_in_order() {
    let text = "Sum([x]) / Count(Distinct([y]))";
    let calls = find_calls(text);
    let names: Vec<&str> = calls.iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Sum", "Count", "Distinct"]);
    assert_eq!(calls[0].arguments(text), "[x]");
    assert_eq!(calls[1].arguments(text), "Distinct([y])");
}

#[test]
fn test_find_calls_skips_bracketed_names() {
    let calls = find_calls("[Total (net)] + Abs ([x])");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "Abs");
}

#[test]
fn test_find_keywords_top_level_only() {
    let sql = "SELECT a, (SELECT b FROM t2) FROM t1 WHERE x = 'FROM' GROUP  BY a";
    let found = find_keywords(sql, &["SELECT", "FROM", "WHERE", "GROUP BY"]);
    let names: Vec<&str> = found.iter().map(|k| k.keyword).collect();
    assert_eq!(names, vec!["SELECT", "FROM", "WHERE", "GROUP BY"]);
    assert_eq!(&sql[found[3].start..found[3].end], "GROUP  BY");
}

#[test]
fn test_find_keywords_whole_words() {
    assert!(find_keywords("SELECT fromage FROM t", &["FROM"]).len() == 1);
    assert!(find_keywords("WHEREVER", &["WHERE"]).is_empty());
}

#[test]
fn test_find_words_any_depth() {
    let text = "ROUND(CASE WHEN a THEN 1 END, 2)";
    assert!(find_keywords(text, &["CASE", "END"]).is_empty());
    let found = find_words(text, &["CASE", "END"]);
    assert_eq!(found.len(), 2);
    assert_eq!(&text[found[0].start..found[1].end], "CASE WHEN a THEN 1 END");
}

#[test]
fn test_contains_word_ignores_brackets() {
    assert!(!contains_word("[End Date] + 1", "End"));
    assert!(contains_word("Case When x Then 1 End", "end"));
}

#[test]
fn test_unbracket() {
    assert_eq!(unbracket("[Sales]"), "Sales");
    assert_eq!(unbracket(" [Sales Amount] "), "Sales Amount");
    assert_eq!(unbracket("[a] + [b]"), "[a] + [b]");
    assert_eq!(unbracket("amount"), "amount");
}
