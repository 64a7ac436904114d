//! Ordered text-rewrite pipeline.
//!
//! Source expressions are translated by a sequence of pure string → string
//! passes (NULL idioms, function calls, boolean operators, column
//! qualification). The order is explicit: a pipeline applies its passes
//! first to last, and each pass only ever sees text outside string literals
//! and bracketed names, which are masked before and restored after each pass.

use crate::dax;
use crate::mapping::{MappingTable, NullRules};
use crate::text::{find_calls, is_ident_char, split_top_level, Call};
use regex::Regex;
use std::sync::OnceLock;

/// Start and end markers of a masked string literal
const LITERAL_OPEN: char = '\u{E000}';
const LITERAL_CLOSE: char = '\u{E001}';
/// Start and end markers of a masked bracketed name (brackets stay visible)
const NAME_OPEN: char = '\u{E002}';
const NAME_CLOSE: char = '\u{E003}';

/// One pure rewrite step
pub trait RewritePass: Send + Sync {
    /// Short name used in logs and tests
    fn name(&self) -> &'static str;

    /// Rewrite masked text
    fn apply(&self, input: &str) -> String;
}

/// An ordered list of passes
pub struct RewritePipeline<'a> {
    passes: Vec<Box<dyn RewritePass + 'a>>,
}

impl<'a> RewritePipeline<'a> {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// Append a pass
    pub fn with(mut self, pass: impl RewritePass + 'a) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// Run every pass in order
    pub fn run(&self, input: &str) -> String {
        self.passes.iter().fold(input.to_string(), |acc, pass| {
            let masked = MaskedText::new(&acc);
            let output = masked.restore(&pass.apply(masked.text()));
            if output != acc {
                log::debug!("rewrite pass '{}': {} -> {}", pass.name(), acc, output);
            }
            output
        })
    }
}

impl Default for RewritePipeline<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Text with literals and bracketed names replaced by numbered placeholders
pub struct MaskedText {
    text: String,
    literals: Vec<String>,
    names: Vec<String>,
}

impl MaskedText {
    /// Mask `'...'` and `"..."` literals (doubled quotes stay inside) and the
    /// contents of `[...]`
    pub fn new(input: &str) -> Self {
        let mut text = String::with_capacity(input.len());
        let mut literals = Vec::new();
        let mut names = Vec::new();
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '\'' | '"' => {
                    let mut literal = String::from(ch);
                    while let Some(next) = chars.next() {
                        literal.push(next);
                        if next == ch {
                            if chars.peek() == Some(&ch) {
                                if let Some(escaped) = chars.next() {
                                    literal.push(escaped);
                                }
                                continue;
                            }
                            break;
                        }
                    }
                    text.push(LITERAL_OPEN);
                    text.push_str(&literals.len().to_string());
                    text.push(LITERAL_CLOSE);
                    literals.push(literal);
                }
                '[' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for next in chars.by_ref() {
                        if next == ']' {
                            closed = true;
                            break;
                        }
                        name.push(next);
                    }
                    text.push('[');
                    text.push(NAME_OPEN);
                    text.push_str(&names.len().to_string());
                    text.push(NAME_CLOSE);
                    if closed {
                        text.push(']');
                    }
                    names.push(name);
                }
                _ => text.push(ch),
            }
        }

        Self {
            text,
            literals,
            names,
        }
    }

    /// Masked text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Put the masked pieces back into a (rewritten) masked text
    pub fn restore(&self, rewritten: &str) -> String {
        let mut out = String::with_capacity(rewritten.len());
        let mut chars = rewritten.chars();
        while let Some(ch) = chars.next() {
            let (store, close) = match ch {
                LITERAL_OPEN => (&self.literals, LITERAL_CLOSE),
                NAME_OPEN => (&self.names, NAME_CLOSE),
                _ => {
                    out.push(ch);
                    continue;
                }
            };
            let digits: String = chars.by_ref().take_while(|&c| c != close).collect();
            match digits.parse::<usize>().ok().and_then(|i| store.get(i)) {
                Some(original) => out.push_str(original),
                None => out.push_str(&digits),
            }
        }
        out
    }
}

/// True for placeholder marker characters
pub fn is_mask_char(c: char) -> bool {
    matches!(c, LITERAL_OPEN | LITERAL_CLOSE | NAME_OPEN | NAME_CLOSE)
}

/// Replacement for one call, given its name and rewritten arguments
type SpecialForm<'a> = Box<dyn Fn(&str, &[&str]) -> Option<String> + Send + Sync + 'a>;

/// Rename function calls through a mapping table; unmapped calls are kept.
///
/// Calls are walked outermost first and their arguments rewritten
/// recursively, so every call is renamed exactly once. An optional special
/// form may replace a whole call (e.g. `CAST(x AS int)`) instead of renaming.
pub struct FunctionCalls<'a> {
    table: &'a MappingTable,
    special: Option<SpecialForm<'a>>,
}

impl<'a> FunctionCalls<'a> {
    pub fn new(table: &'a MappingTable) -> Self {
        Self {
            table,
            special: None,
        }
    }

    /// Route every call through `form` first; `None` falls back to renaming
    pub fn with_special_form(
        mut self,
        form: impl Fn(&str, &[&str]) -> Option<String> + Send + Sync + 'a,
    ) -> Self {
        self.special = Some(Box::new(form));
        self
    }

    fn rewrite(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 8);
        let mut pos = 0;
        for call in find_calls(text) {
            if call.start < pos {
                continue;
            }
            out.push_str(&text[pos..call.start]);
            let Some(close) = call.close else {
                out.push_str(&self.rename(&call, text));
                out.push_str(&self.rewrite(&text[call.open + 1..]));
                pos = text.len();
                break;
            };
            let inner = self.rewrite(&text[call.open + 1..close]);
            let args = split_top_level(&inner, ',');
            match self.special.as_ref().and_then(|form| form(call.name, &args)) {
                Some(replaced) => out.push_str(&replaced),
                None => {
                    out.push_str(&self.rename(&call, text));
                    out.push_str(&inner);
                    out.push(')');
                }
            }
            pos = close + 1;
        }
        out.push_str(&text[pos..]);
        out
    }

    fn rename(&self, call: &Call<'_>, text: &str) -> String {
        match self.table.lookup(call.name) {
            Some(mapped) => format!("{mapped}("),
            None => text[call.start..=call.open].to_string(),
        }
    }
}

impl RewritePass for FunctionCalls<'_> {
    fn name(&self) -> &'static str {
        "function_calls"
    }

    fn apply(&self, input: &str) -> String {
        self.rewrite(input)
    }
}

/// Apply a dialect's ordered NULL-handling rules
pub struct NullIdioms<'a> {
    rules: &'a NullRules,
}

impl<'a> NullIdioms<'a> {
    pub fn new(rules: &'a NullRules) -> Self {
        Self { rules }
    }
}

impl RewritePass for NullIdioms<'_> {
    fn name(&self) -> &'static str {
        "null_idioms"
    }

    fn apply(&self, input: &str) -> String {
        self.rules.apply(input)
    }
}

fn boolean_regexes() -> &'static [(Regex, &'static str); 3] {
    static BOOLEAN_RE: OnceLock<[(Regex, &'static str); 3]> = OnceLock::new();
    BOOLEAN_RE.get_or_init(|| {
        [
            (Regex::new(r"(?i)\bAND\b").expect("valid regex"), "&&"),
            (Regex::new(r"(?i)\bOR\b").expect("valid regex"), "||"),
            (Regex::new(r"(?i)\bNOT\b").expect("valid regex"), "NOT"),
        ]
    })
}

/// `AND`/`OR`/`NOT` → `&&`/`||`/`NOT`
pub struct BooleanOperators;

impl RewritePass for BooleanOperators {
    fn name(&self) -> &'static str {
        "boolean_operators"
    }

    fn apply(&self, input: &str) -> String {
        boolean_regexes()
            .iter()
            .fold(input.to_string(), |acc, (re, replacement)| {
                re.replace_all(&acc, *replacement).into_owned()
            })
    }
}

/// Qualify bare `[Column]` references as `Table[Column]`.
///
/// A bracket already attached to a table (`Table[Column]`, `'My Table'[x]`)
/// or following another bracket is left alone, so the pass is idempotent.
pub struct BracketColumns {
    table_ref: String,
}

impl BracketColumns {
    pub fn new(table: &str) -> Self {
        Self {
            table_ref: dax::table_ref(table),
        }
    }
}

impl RewritePass for BracketColumns {
    fn name(&self) -> &'static str {
        "bracket_columns"
    }

    fn apply(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len() + 16);
        let mut prev: Option<char> = None;
        for ch in input.chars() {
            if ch == '[' {
                let attached = prev.is_some_and(|p| is_ident_char(p) || p == ']' || is_mask_char(p));
                if !attached {
                    out.push_str(&self.table_ref);
                }
            }
            out.push(ch);
            prev = Some(ch);
        }
        out
    }
}

#[cfg(test)]
#[path = "rewrite_test.rs"]
mod tests;
