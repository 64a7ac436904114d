//! Mapping tables from source-dialect names to DAX.
//!
//! Each dialect owns three tables: data types, functions, and ordered
//! NULL-handling rewrite rules. Lookups are case-insensitive on the source
//! side and fall back to the input unchanged.

use crate::error::{CoreError, CoreResult};
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;

/// Immutable lower-cased name → DAX text table
#[derive(Debug, Clone)]
pub struct MappingTable {
    name: &'static str,
    entries: &'static [(&'static str, &'static str)],
    index: HashMap<&'static str, &'static str>,
}

impl MappingTable {
    /// Build a table from static `(source, target)` pairs with lower-case keys
    pub fn new(name: &'static str, entries: &'static [(&'static str, &'static str)]) -> Self {
        let index = entries.iter().copied().collect();
        Self {
            name,
            entries,
            index,
        }
    }

    /// Table name (`functions`, `data_types`)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Case-insensitive lookup
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.index.get(key.trim().to_lowercase().as_str()).copied()
    }

    /// Mapped value, or the key itself when unmapped
    pub fn map<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match self.lookup(key) {
            Some(mapped) => Cow::Borrowed(mapped),
            None => Cow::Borrowed(key),
        }
    }

    /// True when the key has a mapping
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One regex → template rewrite. Templates use `${n}` capture references.
#[derive(Debug, Clone)]
pub struct NullRule {
    source: &'static str,
    pattern: Regex,
    template: &'static str,
}

impl NullRule {
    /// Compile a rule; matching is case-insensitive
    pub fn new(source: &'static str, template: &'static str) -> CoreResult<Self> {
        let pattern =
            Regex::new(&format!("(?i){source}")).map_err(|e| CoreError::InvalidRewriteRule {
                pattern: source.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            source,
            pattern,
            template,
        })
    }

    /// Pattern text as declared
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Replacement template
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Apply the rule to every match
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(text, self.template)
    }
}

/// Ordered NULL-handling rules, applied first to last
#[derive(Debug, Clone)]
pub struct NullRules {
    rules: Vec<NullRule>,
}

impl NullRules {
    /// Compile rules in the given order
    pub fn new(specs: &[(&'static str, &'static str)]) -> CoreResult<Self> {
        let rules = specs
            .iter()
            .map(|(source, template)| NullRule::new(source, template))
            .collect::<CoreResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Apply every rule in order
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc).into_owned())
    }

    pub fn rules(&self) -> &[NullRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The three tables one dialect owns
#[derive(Debug, Clone)]
pub struct DialectMappings {
    pub data_types: MappingTable,
    pub functions: MappingTable,
    pub null_rules: NullRules,
}

impl DialectMappings {
    /// DAX data type for a source type name; parameters such as `(50)` are
    /// ignored, unmapped names pass through
    pub fn data_type<'a>(&self, name: &'a str) -> Cow<'a, str> {
        let base = name.split('(').next().unwrap_or(name).trim();
        match self.data_types.lookup(base) {
            Some(mapped) => Cow::Borrowed(mapped),
            None => Cow::Borrowed(name.trim()),
        }
    }

    /// DAX function for a source function name, unmapped names pass through
    pub fn function<'a>(&self, name: &'a str) -> Cow<'a, str> {
        self.functions.map(name)
    }
}

#[cfg(test)]
#[path = "mapping_test.rs"]
mod tests;
