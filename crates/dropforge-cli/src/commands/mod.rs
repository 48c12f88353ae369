//! CLI command implementations

pub mod json_output;
pub mod render;
pub mod validate;

mod reporting;
