//! dax-sql - SQL front end for daxconv
//!
//! This crate splits SQL scripts into statements with the sqlparser
//! tokenizer, decomposes SELECT statements clause by clause, flags
//! constructs that need manual review, and generates DAX measures and
//! calculated columns.

pub mod dialect;
pub mod error;
pub mod generator;
pub mod mapping;
pub mod objects;
pub mod parser;
pub mod passes;
pub mod select;
pub mod splitter;
pub mod statement;
pub mod validator;

pub use dialect::{AnsiDialect, GenericDialect, MsSqlDialect, SqlDialect};
pub use error::{SqlError, SqlResult};
pub use generator::SqlGenerator;
pub use mapping::sql_mappings;
pub use objects::identify_objects;
pub use parser::SqlParser;
pub use statement::{Join, JoinKind, SelectColumn, SelectStatement, Statement, StatementKind};
pub use validator::advisory_warnings;
