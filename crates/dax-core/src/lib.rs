//! dax-core - Core library for daxconv
//!
//! This crate provides the dialect-neutral model shared by the SQL and
//! Spotfire converters: parsed units, object indexes, conversion results,
//! mapping tables, the ordered text-rewrite pipeline, and configuration.

pub mod case;
pub mod config;
pub mod dax;
pub mod dialect;
pub mod error;
pub mod mapping;
pub mod objects;
pub mod result;
pub mod rewrite;
pub mod text;
pub mod unit;

pub use case::{CaseArm, CaseExpr, CaseExpressions};
pub use config::{ConverterConfig, TokenizerDialect};
pub use dialect::SourceDialect;
pub use error::{CoreError, CoreResult, GenerateError, GenerateResult};
pub use mapping::{DialectMappings, MappingTable, NullRule, NullRules};
pub use objects::{ObjectCategory, ObjectIndex};
pub use result::{ConversionFailure, ConversionResult, DaxOutput, ValidationResult};
pub use rewrite::{
    BooleanOperators, BracketColumns, FunctionCalls, NullIdioms, RewritePass, RewritePipeline,
};
pub use unit::{DaxGenerator, DialectParser, ParsedUnit};
