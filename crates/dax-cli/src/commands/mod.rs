//! CLI command implementations

pub(crate) mod common;
pub(crate) mod convert;
pub(crate) mod mappings;
pub(crate) mod parse;
pub(crate) mod validate;
