//! Validate command implementation

use anyhow::Result;
use dax_convert::Engine;
use dax_core::SourceDialect;

use crate::cli::{GlobalArgs, OutputFormat, ValidateArgs};
use crate::commands::common::{load_config, read_source, ExitCode};

/// Execute the validate command; exits with 1 when errors are found
pub(crate) fn execute(args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let source = read_source(&args.source, global)?;
    let dialect = SourceDialect::from(args.source.dialect);

    let result = Engine::new(&config).validate(&source, dialect);

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => {
            if result.valid {
                println!("{} source is valid", dialect);
            } else {
                for error in &result.errors {
                    println!("[ERROR] {}", error);
                }
                for suggestion in &result.suggestions {
                    println!("  - {}", suggestion);
                }
                println!();
                println!(
                    "Validation failed: {} error{}",
                    result.errors.len(),
                    if result.errors.len() == 1 { "" } else { "s" }
                );
            }
        }
    }

    if !result.valid {
        return Err(ExitCode(1).into());
    }
    Ok(())
}
