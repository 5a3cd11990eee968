use std::process::ExitCode;

use clap::Parser;
use graygrid::cli::{self, CliArgs};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    cli::init_tracing(args.verbose);
    cli::run(args)
}
