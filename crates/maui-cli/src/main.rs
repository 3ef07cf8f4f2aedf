//! `maui`: workspace generators for the MAUI component library.
//!
//! Exit codes: 0 success, 1 internal error or failed external command,
//! 2 invalid input, 3 project or file not found, 4 configuration error.

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // `.env` may carry MAUI_* and RUST_LOG, so it goes first
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version also land here
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }
    debug!(
        workspace = %cli.global.workspace.display(),
        config = ?cli.global.config,
        format = ?cli.global.output_format,
        "maui starting"
    );

    let verbose = cli.global.verbose > 0;
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return report_failure(err, verbose, cli.global.no_color);
        }
    };

    let no_color = cli.global.no_color || config.output.no_color;
    let output = OutputManager::new(&cli.global, &config);
    match run(cli, config, output) {
        Ok(()) => {
            info!("done");
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(e, verbose, no_color),
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let global = cli.global;
    match cli.command {
        Commands::Library(args) => commands::library::execute(args, global, config, output),
        Commands::Tailwind(args) => commands::tailwind::execute(args, global, config, output),
        Commands::Components(args) => commands::components::execute(args, global, config, output),
        Commands::Projects(args) => commands::projects::execute(args, global, config, output),
        Commands::Config(cmd) => commands::config::execute(cmd, global, config, output),
    }
}

/// Log the error, print it on stderr and map it to the process exit code.
fn report_failure(err: CliError, verbose: bool, no_color: bool) -> ExitCode {
    err.log();
    let message = if !no_color && std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{message}");
    ExitCode::from(err.exit_code())
}
