//! Dialect dispatch over the two converters

use dax_core::{ConversionResult, ConverterConfig, SourceDialect, ValidationResult};

use crate::converter::{SpotfireConverter, SqlConverter};
use crate::error::{ConvertError, ConvertResult};

/// Both converters, built once from a configuration and shared freely
pub struct Engine {
    sql: SqlConverter,
    spotfire: SpotfireConverter,
}

impl Engine {
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            sql: SqlConverter::from_config(config),
            spotfire: SpotfireConverter::from_config(config),
        }
    }

    pub fn sql(&self) -> &SqlConverter {
        &self.sql
    }

    pub fn spotfire(&self) -> &SpotfireConverter {
        &self.spotfire
    }

    /// Convert `source` written in `dialect`
    pub fn convert(&self, source: &str, dialect: SourceDialect) -> ConvertResult<ConversionResult> {
        log::debug!("converting {} bytes of {dialect}", source.len());
        match dialect {
            SourceDialect::Sql => self.sql.convert(source),
            SourceDialect::Spotfire => self.spotfire.convert(source),
        }
    }

    /// Validate `source` written in `dialect`
    pub fn validate(&self, source: &str, dialect: SourceDialect) -> ValidationResult {
        match dialect {
            SourceDialect::Sql => self.sql.validate(source),
            SourceDialect::Spotfire => self.spotfire.validate(source),
        }
    }

    /// Convert with the dialect given by name (`sql_to_dax`, `spotfire`, ...).
    /// Blank source is reported before an unknown conversion type.
    pub fn convert_named(
        &self,
        source: &str,
        conversion_type: &str,
    ) -> ConvertResult<ConversionResult> {
        if source.trim().is_empty() {
            return Err(ConvertError::EmptySource);
        }
        let dialect: SourceDialect = conversion_type
            .parse()
            .map_err(|_| ConvertError::UnknownConversionType(conversion_type.to_string()))?;
        self.convert(source, dialect)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(&ConverterConfig::default())
    }
}

/// Convert with the default configuration
pub fn convert(source: &str, dialect: SourceDialect) -> ConvertResult<ConversionResult> {
    Engine::default().convert(source, dialect)
}

/// Validate with the default configuration
pub fn validate(source: &str, dialect: SourceDialect) -> ValidationResult {
    Engine::default().validate(source, dialect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let engine = Engine::default();
        let sql = engine
            .convert("SELECT COUNT(*) FROM Orders", SourceDialect::Sql)
            .unwrap();
        assert_eq!(sql.dax_code, "COUNT_rows = COUNTROWS(Orders)");

        let spotfire = engine
            .convert("Max([Amount])", SourceDialect::Spotfire)
            .unwrap();
        assert_eq!(spotfire.dax_code, "MAX(Table[Amount])");
    }

    #[test]
    fn test_convert_named() {
        let engine = Engine::default();
        assert!(engine.convert_named("Sum([x])", "spotfire_to_dax").is_ok());
        assert_eq!(
            engine.convert_named("Sum([x])", "python_to_dax"),
            Err(ConvertError::UnknownConversionType(
                "python_to_dax".to_string()
            ))
        );
        assert_eq!(
            engine.convert_named("", "python_to_dax"),
            Err(ConvertError::EmptySource)
        );
    }

    #[test]
    fn test_free_functions() {
        assert!(validate("", SourceDialect::Spotfire).errors == vec!["Code cannot be empty"]);
        assert!(convert("DELETE FROM t WHERE x = 1", SourceDialect::Sql).is_ok());
    }
}
