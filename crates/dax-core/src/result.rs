//! Conversion and validation results handed back to callers

use crate::objects::ObjectIndex;
use serde::Serialize;
use thiserror::Error;

/// Successful (possibly degraded) conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub dax_code: String,
    pub objects_identified: ObjectIndex,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

/// Hard conversion failure: no partial output, only a message and hints
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ConversionFailure {
    pub message: String,
    pub suggestions: Vec<String>,
}

impl ConversionFailure {
    /// Create a failure with suggestions
    pub fn new<S: Into<String>>(message: impl Into<String>, suggestions: Vec<S>) -> Self {
        Self {
            message: message.into(),
            suggestions: suggestions.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome of a validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    /// Build a result whose validity follows from the error list
    pub fn from_errors(errors: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            suggestions,
        }
    }
}

/// Text emitted by a generator plus explanatory notes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaxOutput {
    pub code: String,
    pub notes: Vec<String>,
}

impl DaxOutput {
    /// Add a note unless an identical one is already present
    pub fn note(&mut self, note: impl Into<String>) {
        let note = note.into();
        if !self.notes.contains(&note) {
            self.notes.push(note);
        }
    }
}
