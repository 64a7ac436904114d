//! dax-convert - Conversion facade for daxconv
//!
//! Pairs each dialect parser with its generator and exposes the two
//! operations callers need: `convert` source text to DAX, and `validate`
//! it for structural errors.

pub mod converter;
pub mod engine;
pub mod error;

pub use converter::{
    Converter, SpotfireConverter, SqlConverter, EMPTY_CODE, EMPTY_CODE_SUGGESTION,
};
pub use engine::{convert, validate, Engine};
pub use error::{ConvertError, ConvertResult};
