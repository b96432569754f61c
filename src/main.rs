//! Thin binary entry point (spec.md §1: argument tokenisation and exit-code
//! mapping are explicitly out of scope for the core).

use std::process::ExitCode;

use clap::Parser;

use blockzip::cli::{level_filter, Cli, Command};
use blockzip::codec::Registry;
use blockzip::error::Direction;
use blockzip::orchestrator;

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(level_filter(cli.verbose, cli.quiet))
        .init();

    let (direction, args) = match cli.command {
        Command::Compress(args) => (Direction::Compress, args),
        Command::Decompress(args) => (Direction::Decompress, args),
    };
    let request = args.into_request(direction);

    let registry = Registry::with_defaults();
    match orchestrator::run(&registry, request) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("blockzip: {:#}", anyhow::anyhow!(err));
            ExitCode::FAILURE
        }
    }
}
