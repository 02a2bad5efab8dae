mod cli;

use clap::Parser;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let args = cli::surface::Args::parse();
    cli::logging::setup_logging(args.verbose, args.quiet);

    match cli::surface::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
