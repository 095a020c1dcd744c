//! lintfix CLI
//!
//! Lints files with autofix enabled and reports the outcome.

mod cli;
mod commands;
mod logger;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{run_formats, run_init, run_lint_task};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(true)` when lint errors were found.
fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Run(args) => run_lint_task(args),
        Commands::Init { force } => run_init(force).map(|_| false),
        Commands::Formats => run_formats().map(|_| false),
    }
}
