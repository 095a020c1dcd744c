//! CLI argument definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// lintfix - lint with autofix and report the outcome
#[derive(Parser)]
#[command(name = "lintfix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint and fix files
    Run(RunArgs),

    /// Write a starter lintfix.json
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// List available output formats
    Formats,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Files to lint, relative to the root
    pub files: Vec<String>,

    /// Include pattern, relative to the root (repeatable)
    #[arg(long = "include", value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Lint configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory searched for a lint configuration
    #[arg(long, value_name = "DIR")]
    pub rules_dir: Option<PathBuf>,

    /// Compiler project file whose members are linted
    #[arg(short, long, value_name = "FILE")]
    pub project: Option<PathBuf>,

    /// Output format (prose, verbose, json, stylish)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Do not print the report
    #[arg(long)]
    pub silent: bool,

    /// Succeed even when lint errors remain
    #[arg(long)]
    pub ignore_errors: bool,

    /// Task options file (JSON); flags override its values
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Root directory for relative paths (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}
