//! Shared helpers for CLI commands

use anyhow::{Context, Result};
use dax_core::ConverterConfig;
use dax_sql::dialect::from_dialect_name;
use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::cli::{GlobalArgs, SourceArgs};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty: the command has already reported the failure
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the converter config named by `--config`, then apply `--table`
pub(crate) fn load_config(global: &GlobalArgs) -> Result<ConverterConfig> {
    let config = match &global.config {
        Some(path) => {
            if global.verbose {
                eprintln!("[verbose] Loading config from {}", path);
            }
            ConverterConfig::load(Path::new(path))
                .with_context(|| format!("Failed to load config: {}", path))?
        }
        None => ConverterConfig::default(),
    };

    let mut config = match &global.table {
        Some(table) => config
            .with_default_table(table.as_str())
            .context("Invalid --table value")?,
        None => config,
    };
    if let Some(name) = &global.sql_dialect {
        config.sql_dialect = from_dialect_name(name).context("Invalid --sql-dialect value")?;
    }
    log::debug!(
        "default table '{}', SQL dialect {}",
        config.default_table,
        config.sql_dialect
    );
    Ok(config)
}

/// Read the source text from `--expression`, a file, or stdin
pub(crate) fn read_source(args: &SourceArgs, global: &GlobalArgs) -> Result<String> {
    if let Some(expression) = &args.expression {
        return Ok(expression.clone());
    }
    match args.input.as_deref() {
        Some(path) if path != "-" => {
            if global.verbose {
                eprintln!("[verbose] Reading {}", path);
            }
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
        }
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read source from stdin")?;
            Ok(source)
        }
    }
}
