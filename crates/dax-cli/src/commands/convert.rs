//! Convert command implementation

use anyhow::Result;
use dax_convert::Engine;
use dax_core::{ConversionFailure, ConversionResult, SourceDialect};
use serde_json::json;

use crate::cli::{ConvertArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{load_config, read_source, ExitCode};

/// Execute the convert command
pub(crate) fn execute(args: &ConvertArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let source = read_source(&args.source, global)?;
    let dialect = SourceDialect::from(args.source.dialect);

    if global.verbose {
        eprintln!(
            "[verbose] Converting {} bytes of {} (default table '{}')",
            source.len(),
            dialect,
            config.default_table
        );
    }

    let engine = Engine::new(&config);
    match engine.convert(&source, dialect) {
        Ok(result) => {
            match args.output {
                OutputFormat::Text => print_text(&result),
                OutputFormat::Json => print_json(&result)?,
            }
            Ok(())
        }
        Err(err) => {
            let failure = ConversionFailure::from(err);
            match args.output {
                OutputFormat::Text => {
                    eprintln!("Error: {}", failure.message);
                    for suggestion in &failure.suggestions {
                        eprintln!("  - {}", suggestion);
                    }
                }
                OutputFormat::Json => {
                    let output = json!({
                        "success": false,
                        "error": failure.message,
                        "suggestions": failure.suggestions,
                    });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
            }
            Err(ExitCode(1).into())
        }
    }
}

/// DAX on stdout; warnings and notes on stderr so the code can be piped
fn print_text(result: &ConversionResult) {
    println!("{}", result.dax_code);
    for warning in &result.warnings {
        eprintln!("Warning: {}", warning);
    }
    for note in &result.notes {
        eprintln!("Note: {}", note);
    }
}

fn print_json(result: &ConversionResult) -> Result<()> {
    let output = json!({
        "success": true,
        "converted_code": result.dax_code,
        "objects_identified": result.objects_identified,
        "warnings": result.warnings,
        "conversion_notes": result.notes,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
