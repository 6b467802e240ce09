//! bdp CLI - discover, check, and materialize annotated data assets

use clap::Parser;

mod cli;
mod commands;
mod logging;
mod transforms;

use cli::Cli;
use commands::common::ExitCode;
use commands::{check, docs, list, materialize};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    let result = match &cli.command {
        cli::Commands::Materialize(args) => materialize::execute(args, &cli.global),
        cli::Commands::List(args) => list::execute(args, &cli.global),
        cli::Commands::Check(args) => check::execute(args, &cli.global),
        cli::Commands::Docs(args) => docs::execute(args, &cli.global),
    };

    if let Err(err) = result {
        if let Some(ExitCode(code)) = err.downcast_ref::<ExitCode>() {
            std::process::exit(*code);
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
