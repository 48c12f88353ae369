//! Validate command implementation
//!
//! Loads a score and reports every validation problem without rendering.

use anyhow::{Context, Result};
use colored::Colorize;
use dropforge_spec::{load_score, validate_score, LoadResult};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{load_error_to_json, ValidateOutput};
use super::reporting;

/// Run the validate command
///
/// # Arguments
/// * `score_path` - Path to the score file (YAML or JSON)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(score_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(score_path)
    } else {
        run_human(score_path)
    }
}

/// Run validate with human-readable (colored) output
fn run_human(score_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), score_path);

    let LoadResult {
        score,
        format,
        source_hash,
    } = load_score(Path::new(score_path))
        .with_context(|| format!("Failed to load score file: {}", score_path))?;

    println!(
        "{} {} ({})",
        "Source:".dimmed(),
        format.as_str(),
        &source_hash[..16]
    );

    let result = validate_score(&score);
    reporting::print_errors(&result.errors);
    reporting::print_warnings(&result.warnings);

    if result.is_ok() {
        println!(
            "\n{} Score is valid ({} section(s), {:.2}s)",
            "SUCCESS".green().bold(),
            score.sections.len(),
            score.total_duration()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Score has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

/// Run validate with machine-readable JSON output
fn run_json(score_path: &str) -> Result<ExitCode> {
    let output = validate_to_output(score_path);
    let json = serde_json::to_string_pretty(&output)
        .context("Failed to serialize validation output")?;
    println!("{}", json);

    if output.ok {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Loads and validates a score, folding load failures into the JSON shape.
pub fn validate_to_output(score_path: &str) -> ValidateOutput {
    match load_score(Path::new(score_path)) {
        Ok(loaded) => {
            let result = validate_score(&loaded.score);
            ValidateOutput::from_validation(&result, loaded.source_hash)
        }
        Err(e) => ValidateOutput::load_failure(load_error_to_json(&e, score_path)),
    }
}
