//! dax-spotfire - Spotfire front end for daxconv
//!
//! This crate reassembles Spotfire custom expressions from their source
//! lines, classifies each one as an aggregation, a conditional or a
//! row-level calculation, and generates DAX measures and calculated
//! columns from them.

pub mod error;
pub mod expression;
pub mod generator;
pub mod mapping;
pub mod objects;
pub mod over;
pub mod parser;
pub mod splitter;
pub mod validator;

pub use error::{SpotfireError, SpotfireResult};
pub use expression::{
    Aggregation, Calculation, Conditional, ConditionalForm, Expression, ExpressionKind,
};
pub use generator::{expression_pipeline, SpotfireGenerator};
pub use mapping::spotfire_mappings;
pub use objects::identify_objects;
pub use over::OverContext;
pub use parser::{is_aggregate, SpotfireParser, AGGREGATE_FUNCTIONS};
pub use splitter::{split_expressions, RawExpression, SplitExpressions};
pub use validator::advisory_warnings;
