mod cli;
mod config;
mod error;
mod logging;
mod output;

use clap::Parser;
use std::process::ExitCode;
use watchsift_core::Sifter;

use crate::cli::{Cli, OutputFormat};
use crate::error::CliError;
use crate::output::RenderOptions;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level, cli.log_format)?;

    let folder = config::resolve_folder(&cli.folder);
    if cli.format == OutputFormat::Text {
        output::render_header(&folder)?;
    }

    let run_config = cli.run_config(folder);
    let outcome = Sifter::new().run(&run_config)?;

    output::render(
        &outcome,
        RenderOptions {
            format: cli.format,
            pretty: cli.pretty,
            print_line: !cli.no_print,
        },
    )
}
