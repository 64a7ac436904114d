//! Object index: identifiers discovered while parsing

use serde::Serialize;
use std::collections::BTreeSet;

/// Category of a discovered identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectCategory {
    Tables,
    Columns,
    Functions,
    Aliases,
}

/// De-duplicated sets of tables, columns, functions and aliases found in
/// the source text. Sets are ordered only so output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectIndex {
    pub tables: BTreeSet<String>,
    pub columns: BTreeSet<String>,
    pub functions: BTreeSet<String>,
    pub aliases: BTreeSet<String>,
}

impl ObjectIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an identifier; blank names are ignored
    pub fn insert(&mut self, category: ObjectCategory, name: impl Into<String>) {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.set_mut(category).insert(name.to_string());
    }

    /// Record several identifiers of one category
    pub fn extend<I, S>(&mut self, category: ObjectCategory, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.insert(category, name);
        }
    }

    /// Borrow the set for a category
    pub fn get(&self, category: ObjectCategory) -> &BTreeSet<String> {
        match category {
            ObjectCategory::Tables => &self.tables,
            ObjectCategory::Columns => &self.columns,
            ObjectCategory::Functions => &self.functions,
            ObjectCategory::Aliases => &self.aliases,
        }
    }

    fn set_mut(&mut self, category: ObjectCategory) -> &mut BTreeSet<String> {
        match category {
            ObjectCategory::Tables => &mut self.tables,
            ObjectCategory::Columns => &mut self.columns,
            ObjectCategory::Functions => &mut self.functions,
            ObjectCategory::Aliases => &mut self.aliases,
        }
    }

    /// Check whether a category contains a name
    pub fn contains(&self, category: ObjectCategory, name: &str) -> bool {
        self.get(category).contains(name)
    }

    /// True when nothing was discovered
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
            && self.columns.is_empty()
            && self.functions.is_empty()
            && self.aliases.is_empty()
    }
}
