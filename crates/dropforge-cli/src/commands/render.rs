//! Render command implementation
//!
//! Loads, validates and renders a score to a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use dropforge_spec::{load_score, validate_score};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::reporting;

/// Run the render command
///
/// # Arguments
/// * `score_path` - Path to the score file (YAML or JSON)
/// * `output_path` - Path of the WAV file to write
/// * `seed` - Optional override for the score's noise seed
/// * `skip_validation` - Render even when validation reports errors
///
/// # Returns
/// Exit code: 0 on success, 1 if validation failed
pub fn run(
    score_path: &str,
    output_path: &str,
    seed: Option<u32>,
    skip_validation: bool,
) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Rendering:".cyan().bold(), score_path);

    let mut score = load_score(Path::new(score_path))
        .with_context(|| format!("Failed to load score file: {}", score_path))?
        .score;

    if let Some(seed) = seed {
        score.seed = seed;
    }

    let validation = validate_score(&score);
    reporting::print_warnings(&validation.warnings);
    if !validation.is_ok() {
        reporting::print_errors(&validation.errors);
        if !skip_validation {
            println!(
                "\n{} Score has {} error(s); nothing was written",
                "FAILED".red().bold(),
                validation.errors.len()
            );
            return Ok(ExitCode::from(1));
        }
        tracing::warn!(
            "Rendering despite {} validation error(s)",
            validation.errors.len()
        );
    }

    let result = dropforge_engine::render(&score, Path::new(output_path))
        .with_context(|| format!("Failed to render {}", output_path))?;

    let duration_ms = start.elapsed().as_millis() as u64;

    println!(
        "\n{} Wrote {} ({}ms)",
        "SUCCESS".green().bold(),
        output_path,
        duration_ms
    );
    println!("  {} {:.2}s", "Duration:".dimmed(), result.duration);
    println!(
        "  {} {} @ {} Hz",
        "Samples:".dimmed(),
        result.wav.num_samples,
        result.wav.sample_rate
    );
    println!(
        "  {} {}{}",
        "Kicks:".dimmed(),
        result.kick_count,
        if result.sidechained { " (sidechained)" } else { "" }
    );
    println!("  {} {}", "PCM hash:".dimmed(), result.wav.pcm_hash);

    Ok(ExitCode::SUCCESS)
}
