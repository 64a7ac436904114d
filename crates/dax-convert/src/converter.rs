//! One converter per source dialect: a parser and a generator behind the
//! `convert`/`validate` contract

use dax_core::{
    ConversionResult, ConverterConfig, DaxGenerator, DialectParser, ParsedUnit, ValidationResult,
};
use dax_spotfire::{SpotfireGenerator, SpotfireParser};
use dax_sql::{SqlGenerator, SqlParser};

use crate::error::{ConvertError, ConvertResult};

/// Validation error for blank input
pub const EMPTY_CODE: &str = "Code cannot be empty";

/// Validation suggestion for blank input
pub const EMPTY_CODE_SUGGESTION: &str = "Enter valid source code";

/// Composes a dialect parser with the generator for its items
pub struct Converter<P, G> {
    parser: P,
    generator: G,
}

impl<P, G> Converter<P, G>
where
    P: DialectParser,
    G: DaxGenerator<Item = P::Item>,
{
    pub fn new(parser: P, generator: G) -> Self {
        Self { parser, generator }
    }

    /// Parse without generating
    pub fn parse(&self, source: &str) -> ParsedUnit<P::Item> {
        self.parser.parse(source)
    }

    /// Convert source text to DAX.
    ///
    /// Parse errors do not stop conversion; they are reported as warnings
    /// and the affected statements degrade to comment placeholders.
    pub fn convert(&self, source: &str) -> ConvertResult<ConversionResult> {
        if source.trim().is_empty() {
            return Err(ConvertError::EmptySource);
        }

        let unit = self.parser.parse(source);
        let output = self.generator.generate(&unit).map_err(|err| {
            log::warn!("DAX generation failed: {err}");
            ConvertError::from(err)
        })?;

        let mut warnings = unit.warnings;
        warnings.extend(
            unit.parse_errors
                .iter()
                .map(|err| format!("Parse error: {err}")),
        );
        Ok(ConversionResult {
            dax_code: output.code,
            objects_identified: unit.objects,
            warnings,
            notes: output.notes,
        })
    }

    /// Report structural errors without generating anything
    pub fn validate(&self, source: &str) -> ValidationResult {
        if source.trim().is_empty() {
            return ValidationResult::from_errors(
                vec![EMPTY_CODE.to_string()],
                vec![EMPTY_CODE_SUGGESTION.to_string()],
            );
        }
        let unit = self.parser.parse(source);
        ValidationResult::from_errors(unit.parse_errors, unit.suggestions)
    }
}

/// SQL → DAX
pub type SqlConverter = Converter<SqlParser, SqlGenerator>;

/// Spotfire → DAX
pub type SpotfireConverter = Converter<SpotfireParser, SpotfireGenerator>;

impl SqlConverter {
    pub fn from_config(config: &ConverterConfig) -> Self {
        Converter::new(
            SqlParser::from_tokenizer_dialect(config.sql_dialect),
            SqlGenerator::new(config.default_table.clone()),
        )
    }
}

impl SpotfireConverter {
    pub fn from_config(config: &ConverterConfig) -> Self {
        Converter::new(
            SpotfireParser::new(config.default_table.clone()),
            SpotfireGenerator::new(),
        )
    }
}

#[cfg(test)]
#[path = "converter_test.rs"]
mod tests;
