//! SQL-specific rewrite passes and the two SQL pipelines.
//!
//! Select-list expressions qualify every bare identifier; WHERE predicates
//! only qualify identifiers that sit directly before a comparison operator
//! or that are the tested argument of `ISNULL`/`NULLIF`.

use dax_core::dax;
use dax_core::rewrite::{is_mask_char, BooleanOperators, BracketColumns, FunctionCalls, NullIdioms};
use dax_core::text::{find_keywords, is_ident_char, is_ident_start};
use dax_core::{CaseExpressions, DialectMappings, RewritePass, RewritePipeline};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::statement::{is_reserved, SelectStatement};

/// Tables visible to one SELECT: the primary table plus every FROM/JOIN
/// table and alias, keyed case-insensitively
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableScope {
    primary: String,
    qualifiers: HashMap<String, String>,
}

impl TableScope {
    /// Scope with a single table
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            qualifiers: HashMap::new(),
        }
    }

    /// Scope of a SELECT; `default_table` stands in when FROM is missing
    pub fn for_select(select: &SelectStatement, default_table: &str) -> Self {
        let mut scope = Self::new(select.primary_table().unwrap_or(default_table));
        let joined = select.joins.iter().map(|j| &j.table);
        for table in select.tables.iter().chain(joined) {
            scope.qualifiers.insert(table.to_lowercase(), table.clone());
        }
        for (alias, table) in &select.table_aliases {
            scope.qualifiers.insert(alias.to_lowercase(), table.clone());
        }
        scope
    }

    /// Table that measures, filters and bare columns refer to
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Table for a qualifier; unknown qualifiers are taken as table names
    pub fn resolve<'a>(&'a self, qualifier: &'a str) -> &'a str {
        self.qualifiers
            .get(&qualifier.to_lowercase())
            .map(String::as_str)
            .unwrap_or(qualifier)
    }

    /// Table for an optional qualifier
    pub fn table_for<'a>(&'a self, qualifier: Option<&'a str>) -> &'a str {
        match qualifier {
            Some(q) => self.resolve(q),
            None => &self.primary,
        }
    }

    /// `Table[column]` for a bare or dotted reference (`o.amount`)
    pub fn column_ref(&self, reference: &str) -> String {
        match reference.rsplit_once('.') {
            Some((qualifier, column)) => {
                let qualifier = qualifier.rsplit('.').next().unwrap_or(qualifier);
                dax::column_ref(self.resolve(qualifier), column)
            }
            None => dax::column_ref(&self.primary, reference),
        }
    }
}

/// Walk identifier chains (`a`, `t.a`) outside brackets and literals,
/// qualifying those accepted by `wanted(before, word, rest)`. Calls, table
/// names followed by `[`, reserved words and `@variables` are never touched.
fn qualify_words(
    input: &str,
    scope: &TableScope,
    wanted: impl Fn(&str, &str, &str) -> bool,
) -> String {
    let mut out = String::with_capacity(input.len() + 32);
    let mut pos = 0;
    while let Some(ch) = input[pos..].chars().next() {
        if ch == '[' {
            let end = input[pos..]
                .find(']')
                .map_or(input.len(), |offset| pos + offset + 1);
            out.push_str(&input[pos..end]);
            pos = end;
            continue;
        }
        if is_ident_char(ch) {
            let end = chain_end(input, pos);
            let word = &input[pos..end];
            let rest = &input[end..];
            let next = rest.trim_start().chars().next();
            let prev = input[..pos].chars().next_back();
            let candidate = is_ident_start(ch)
                && !matches!(next, Some('(') | Some('['))
                && !prev.is_some_and(|p| is_mask_char(p) || matches!(p, '@' | '#' | ':' | '.'))
                && (word.contains('.') || !is_reserved(word));
            if candidate && wanted(&input[..pos], word, rest) {
                out.push_str(&scope.column_ref(word));
            } else {
                out.push_str(word);
            }
            pos = end;
            continue;
        }
        out.push(ch);
        pos += ch.len_utf8();
    }
    out
}

/// End of an identifier chain: word characters joined by single dots
fn chain_end(input: &str, start: usize) -> usize {
    let mut end = start;
    let mut chars = input[start..].char_indices().peekable();
    while let Some((offset, ch)) = chars.next() {
        if is_ident_char(ch) {
            end = start + offset + ch.len_utf8();
        } else if ch == '.' && chars.peek().is_some_and(|&(_, next)| is_ident_start(next)) {
            continue;
        } else {
            break;
        }
    }
    end
}

/// Qualify every bare identifier of an expression
pub struct QualifyIdentifiers<'a> {
    scope: &'a TableScope,
}

impl<'a> QualifyIdentifiers<'a> {
    pub fn new(scope: &'a TableScope) -> Self {
        Self { scope }
    }
}

impl RewritePass for QualifyIdentifiers<'_> {
    fn name(&self) -> &'static str {
        "qualify_identifiers"
    }

    fn apply(&self, input: &str) -> String {
        qualify_words(input, self.scope, |_, _, _| true)
    }
}

fn comparison_regex() -> &'static Regex {
    static COMPARISON_RE: OnceLock<Regex> = OnceLock::new();
    COMPARISON_RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*(?:<>|!=|>=|<=|=|>|<|IS\b|NOT\s+LIKE\b|LIKE\b|NOT\s+IN\b|IN\b|NOT\s+BETWEEN\b|BETWEEN\b)",
        )
        .expect("valid regex")
    })
}

fn null_call_regex() -> &'static Regex {
    static NULL_CALL_RE: OnceLock<Regex> = OnceLock::new();
    NULL_CALL_RE
        .get_or_init(|| Regex::new(r"(?i)\b(?:ISNULL|NULLIF)\s*\(\s*$").expect("valid regex"))
}

/// Qualify identifiers that stand directly before a comparison operator,
/// the first argument of `ISNULL(x, ..)`/`NULLIF(x, ..)`, and any dotted
/// `alias.column` reference
pub struct QualifyComparisons<'a> {
    scope: &'a TableScope,
}

impl<'a> QualifyComparisons<'a> {
    pub fn new(scope: &'a TableScope) -> Self {
        Self { scope }
    }
}

impl RewritePass for QualifyComparisons<'_> {
    fn name(&self) -> &'static str {
        "qualify_comparisons"
    }

    fn apply(&self, input: &str) -> String {
        qualify_words(input, self.scope, |before, word, rest| {
            word.contains('.')
                || comparison_regex().is_match(rest)
                || (null_call_regex().is_match(before) && rest.trim_start().starts_with(','))
        })
    }
}

fn between_regex() -> &'static Regex {
    static BETWEEN_RE: OnceLock<Regex> = OnceLock::new();
    BETWEEN_RE.get_or_init(|| {
        Regex::new(
            r"(?i)([A-Za-z_][\w.]*\s*\([^()]*\)|(?:[A-Za-z_][\w.]*)?\[[^\]]*\]|[A-Za-z_][\w.]*)\s+BETWEEN\s+([^\s()]+(?:\([^()]*\))?)\s+AND\s+([^\s()]+(?:\([^()]*\))?)",
        )
        .expect("valid regex")
    })
}

/// `x BETWEEN a AND b` → `(x >= a && x <= b)`, before `AND` becomes `&&`
pub struct BetweenRanges;

impl RewritePass for BetweenRanges {
    fn name(&self) -> &'static str {
        "between_ranges"
    }

    fn apply(&self, input: &str) -> String {
        between_regex()
            .replace_all(input, |caps: &Captures| {
                format!("({0} >= {1} && {0} <= {2})", &caps[1], &caps[2], &caps[3])
            })
            .into_owned()
    }
}

/// Special form for `CAST(x AS type)` and `CONVERT(type, x)`, both emitted as
/// DAX `CONVERT(x, TYPE)` through the data-type table
pub fn cast_form(
    mappings: &DialectMappings,
) -> impl Fn(&str, &[&str]) -> Option<String> + Send + Sync + '_ {
    move |name: &str, args: &[&str]| {
        if name.eq_ignore_ascii_case("CAST") && args.len() == 1 {
            let kw = find_keywords(args[0], &["AS"]).pop()?;
            let expr = args[0][..kw.start].trim();
            let ty = args[0][kw.end..].trim();
            if expr.is_empty() || ty.is_empty() {
                return None;
            }
            return Some(format!("CONVERT({expr}, {})", mappings.data_type(ty)));
        }
        if name.eq_ignore_ascii_case("CONVERT") && args.len() >= 2 {
            let base = args[0].split('(').next().unwrap_or(args[0]);
            if mappings.data_types.contains(base) {
                return Some(format!("CONVERT({}, {})", args[1], mappings.data_type(args[0])));
            }
        }
        None
    }
}

/// Pipeline for select-list expressions
pub fn calculation_pipeline<'a>(
    scope: &'a TableScope,
    mappings: &'a DialectMappings,
) -> RewritePipeline<'a> {
    RewritePipeline::new()
        .with(CaseExpressions)
        .with(NullIdioms::new(&mappings.null_rules))
        .with(FunctionCalls::new(&mappings.functions).with_special_form(cast_form(mappings)))
        .with(BetweenRanges)
        .with(BooleanOperators)
        .with(BracketColumns::new(scope.primary()))
        .with(QualifyIdentifiers::new(scope))
}

/// Pipeline for WHERE predicates; NULL idioms run before the function table,
/// which would otherwise turn `ISNULL` into a plain `IF`
pub fn filter_pipeline<'a>(
    scope: &'a TableScope,
    mappings: &'a DialectMappings,
) -> RewritePipeline<'a> {
    RewritePipeline::new()
        .with(QualifyComparisons::new(scope))
        .with(NullIdioms::new(&mappings.null_rules))
        .with(FunctionCalls::new(&mappings.functions).with_special_form(cast_form(mappings)))
        .with(BetweenRanges)
        .with(BooleanOperators)
        .with(BracketColumns::new(scope.primary()))
}

#[cfg(test)]
#[path = "passes_test.rs"]
mod tests;
