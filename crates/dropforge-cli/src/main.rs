//! Dropforge CLI - Command-line interface for procedural track rendering
//!
//! This binary validates Dropforge scores and renders them to WAV files.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use dropforge_cli::commands;

mod cli_args;

use cli_args::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            score,
            output,
            seed,
            skip_validation,
        } => commands::render::run(&score, &output, seed, skip_validation),
        Commands::Validate { score, json } => commands::validate::run(&score, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
