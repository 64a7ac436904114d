//! Parsed units and the parser/generator seams

use crate::error::GenerateResult;
use crate::objects::ObjectIndex;
use crate::result::DaxOutput;
use serde::Serialize;

/// Dialect-neutral intermediate structure produced by a parser.
///
/// `items` holds statements (SQL) or expressions (Spotfire) in source order.
/// A unit with parse errors can still be generated from; generators degrade
/// to comment placeholders for anything they cannot translate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedUnit<T> {
    pub items: Vec<T>,
    pub objects: ObjectIndex,
    pub warnings: Vec<String>,
    pub parse_errors: Vec<String>,
    pub suggestions: Vec<String>,
}

impl<T> ParsedUnit<T> {
    /// Create an empty unit
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            objects: ObjectIndex::new(),
            warnings: Vec::new(),
            parse_errors: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Record a structural error together with a hint for fixing it
    pub fn error(&mut self, message: impl Into<String>, suggestion: impl Into<String>) {
        self.parse_errors.push(message.into());
        let suggestion = suggestion.into();
        if !self.suggestions.contains(&suggestion) {
            self.suggestions.push(suggestion);
        }
    }

    /// True when parsing found structural errors
    pub fn has_errors(&self) -> bool {
        !self.parse_errors.is_empty()
    }
}

impl<T> Default for ParsedUnit<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns source text of one dialect into a parsed unit.
///
/// Parsing never fails as a whole: structural problems are recorded in
/// `ParsedUnit::parse_errors`.
pub trait DialectParser: Send + Sync {
    type Item;

    /// Parse source text
    fn parse(&self, source: &str) -> ParsedUnit<Self::Item>;
}

/// Emits DAX for a parsed unit of one dialect
pub trait DaxGenerator: Send + Sync {
    type Item;

    /// Generate DAX text and notes
    fn generate(&self, unit: &ParsedUnit<Self::Item>) -> GenerateResult<DaxOutput>;
}
