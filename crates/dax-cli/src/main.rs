//! daxc - convert SQL queries and Spotfire expressions to DAX

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::ExitCode;
use commands::{convert, mappings, parse, validate};

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        cli::Commands::Convert(args) => convert::execute(args, &cli.global),
        cli::Commands::Validate(args) => validate::execute(args, &cli.global),
        cli::Commands::Parse(args) => parse::execute(args, &cli.global),
        cli::Commands::Mappings(args) => mappings::execute(args, &cli.global),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        let code = match err.downcast_ref::<ExitCode>() {
            Some(exit) => exit.0,
            None => {
                eprintln!("Error: {:#}", err);
                1
            }
        };
        std::process::exit(code);
    }
}
