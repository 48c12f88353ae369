//! CLI argument definitions for the Dropforge command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// Dropforge - Procedural EDM track renderer
#[derive(Parser)]
#[command(name = "dropforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Enable debug logging on stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a score to a 16-bit mono WAV file
    Render {
        /// Path to the score file (YAML or JSON)
        score: String,

        /// Path of the WAV file to write
        output: String,

        /// Override the score's noise seed
        #[arg(long)]
        seed: Option<u32>,

        /// Render even if validation reports errors
        #[arg(long)]
        skip_validation: bool,
    },

    /// Validate a score without rendering it
    Validate {
        /// Path to the score file (YAML or JSON)
        score: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}
