//! JSON output types for machine-readable CLI output.
//!
//! Used by `validate --json` so scripts and editors can consume diagnostics
//! without parsing colored text.

use dropforge_spec::{SpecError, ValidationError, ValidationResult, ValidationWarning};
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable. Validation diagnostics pass through their own
/// `E0xx` / `W0xx` codes.
pub mod error_codes {
    /// Score file could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown file extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// YAML parse error
    pub const YAML_PARSE: &str = "CLI_003";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_004";
    /// Any other load failure
    pub const INVALID_SCORE: &str = "CLI_005";
}

/// A structured diagnostic in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonDiagnostic {
    /// Stable code (e.g., "CLI_001", "E008", "W003")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Score path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonDiagnostic {
    /// Creates a diagnostic without a path.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the score path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl From<&ValidationError> for JsonDiagnostic {
    fn from(error: &ValidationError) -> Self {
        Self {
            code: error.code.to_string(),
            message: error.message.clone(),
            path: error.path.clone(),
        }
    }
}

impl From<&ValidationWarning> for JsonDiagnostic {
    fn from(warning: &ValidationWarning) -> Self {
        Self {
            code: warning.code.to_string(),
            message: warning.message.clone(),
            path: warning.path.clone(),
        }
    }
}

/// Maps a score loading failure to a CLI diagnostic.
pub fn load_error_to_json(error: &SpecError, score_path: &str) -> JsonDiagnostic {
    let code = match error {
        SpecError::Io(_) => error_codes::FILE_READ,
        SpecError::UnsupportedExtension(_) => error_codes::UNKNOWN_EXTENSION,
        SpecError::Yaml(_) => error_codes::YAML_PARSE,
        SpecError::Json(_) => error_codes::JSON_PARSE,
        SpecError::ValidationFailed(_) => error_codes::INVALID_SCORE,
    };
    JsonDiagnostic::new(code, error.to_string()).with_path(score_path)
}

/// Output of `validate --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidateOutput {
    /// Whether the score is renderable.
    pub ok: bool,
    /// Blocking problems.
    pub errors: Vec<JsonDiagnostic>,
    /// Non-blocking problems.
    pub warnings: Vec<JsonDiagnostic>,
    /// BLAKE3 hash of the score source, when it could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

impl ValidateOutput {
    /// Builds the output from a validation result.
    pub fn from_validation(result: &ValidationResult, source_hash: String) -> Self {
        Self {
            ok: result.is_ok(),
            errors: result.errors.iter().map(JsonDiagnostic::from).collect(),
            warnings: result.warnings.iter().map(JsonDiagnostic::from).collect(),
            source_hash: Some(source_hash),
        }
    }

    /// Builds a failed output for a score that could not be loaded.
    pub fn load_failure(error: JsonDiagnostic) -> Self {
        Self {
            ok: false,
            errors: vec![error],
            warnings: Vec::new(),
            source_hash: None,
        }
    }
}
