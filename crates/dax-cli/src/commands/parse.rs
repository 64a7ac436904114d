//! Parse command implementation

use anyhow::Result;
use dax_convert::Engine;

use crate::cli::{DialectArg, GlobalArgs, ParseArgs};
use crate::commands::common::{load_config, read_source};

/// Execute the parse command: print the parsed unit as JSON
pub(crate) fn execute(args: &ParseArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let source = read_source(&args.source, global)?;
    let engine = Engine::new(&config);

    let json = match args.source.dialect {
        DialectArg::Sql => serde_json::to_string_pretty(&engine.sql().parse(&source))?,
        DialectArg::Spotfire => serde_json::to_string_pretty(&engine.spotfire().parse(&source))?,
    };
    println!("{}", json);
    Ok(())
}
