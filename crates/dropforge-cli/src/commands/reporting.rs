//! Shared console output for validation diagnostics.

use colored::Colorize;
use dropforge_spec::{ValidationError, ValidationWarning};

fn path_info(path: &Option<String>) -> String {
    path.as_ref().map(|p| format!(" at {}", p)).unwrap_or_default()
}

/// Prints validation errors under an `Errors:` heading.
pub(super) fn print_errors(errors: &[ValidationError]) {
    if errors.is_empty() {
        return;
    }
    println!("\n{}", "Errors:".red().bold());
    for (i, error) in errors.iter().enumerate() {
        println!(
            "  {} {}. [{}]{}: {}",
            "x".red(),
            i + 1,
            error.code.to_string().red(),
            path_info(&error.path).dimmed(),
            error.message
        );
    }
}

/// Prints validation warnings under a `Warnings:` heading.
pub(super) fn print_warnings(warnings: &[ValidationWarning]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n{}", "Warnings:".yellow().bold());
    for warning in warnings {
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code.to_string().yellow(),
            path_info(&warning.path).dimmed(),
            warning.message
        );
    }
}
