//! Error types for dax-convert

use dax_core::{ConversionFailure, GenerateError};
use thiserror::Error;

/// Reasons a conversion produces no output at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// C001: Nothing to convert
    #[error("[C001] Please provide source code to convert")]
    EmptySource,

    /// C002: Conversion type is neither SQL nor Spotfire
    #[error("[C002] Invalid conversion type '{0}'")]
    UnknownConversionType(String),

    /// C003: The generator rejected the parsed unit
    #[error("[C003] Conversion error: {0}")]
    Generation(#[from] GenerateError),
}

impl ConvertError {
    /// Hints shown to the user next to the error message
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            ConvertError::EmptySource => vec!["Enter SQL or Spotfire code in the input area"],
            ConvertError::UnknownConversionType(_) => {
                vec!["Please select either SQL to DAX or Spotfire to DAX"]
            }
            ConvertError::Generation(_) => vec![
                "Check if your code syntax is valid",
                "Ensure all table and column names are properly formatted",
                "Try converting smaller code segments first",
            ],
        }
    }
}

impl From<ConvertError> for ConversionFailure {
    fn from(err: ConvertError) -> Self {
        ConversionFailure::new(err.to_string(), err.suggestions())
    }
}

/// Result type alias for ConvertError
pub type ConvertResult<T> = Result<T, ConvertError>;
