//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use dax_core::SourceDialect;

/// daxc - convert SQL queries and Spotfire expressions to DAX
#[derive(Parser, Debug)]
#[command(name = "daxc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a converter config file (YAML)
    #[arg(short, long, global = true, env = "DAXC_CONFIG")]
    pub config: Option<String>,

    /// Table name used when the source names none
    #[arg(short, long, global = true)]
    pub table: Option<String>,

    /// SQL tokenizer dialect: generic, mssql (tsql) or ansi
    #[arg(long, global = true)]
    pub sql_dialect: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert source code to DAX
    Convert(ConvertArgs),

    /// Check source code for structural errors
    Validate(ValidateArgs),

    /// Print the parsed statements or expressions as JSON
    Parse(ParseArgs),

    /// List a dialect's mapping table
    Mappings(MappingsArgs),
}

/// Where the source text comes from
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Source dialect
    #[arg(short, long, value_enum)]
    pub dialect: DialectArg,

    /// Input file; reads stdin when omitted or "-"
    pub input: Option<String>,

    /// Source text given inline instead of a file
    #[arg(short, long, conflicts_with = "input")]
    pub expression: Option<String>,
}

/// Source dialect selector
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectArg {
    /// SQL queries
    Sql,
    /// Spotfire custom expressions
    Spotfire,
}

impl From<DialectArg> for SourceDialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Sql => SourceDialect::Sql,
            DialectArg::Spotfire => SourceDialect::Spotfire,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the mappings command
#[derive(Args, Debug)]
pub struct MappingsArgs {
    /// Dialect whose tables to list
    #[arg(short, long, value_enum)]
    pub dialect: DialectArg,

    /// Table to list
    #[arg(short, long, value_enum, default_value = "functions")]
    pub kind: MappingKind,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Mapping tables of a dialect
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    /// Data type names
    DataTypes,
    /// Function names
    Functions,
    /// NULL-handling rewrite rules
    NullRules,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
