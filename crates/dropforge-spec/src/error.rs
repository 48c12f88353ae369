//! Error types for score loading and validation.

use thiserror::Error;

/// Error codes for score validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Score-level errors (E001-E004)
    /// E001: Score has no sections
    NoSections,
    /// E002: Tempo is not positive
    InvalidTempo,
    /// E003: Sample rate is zero
    InvalidSampleRate,
    /// E004: Section bar count is zero
    InvalidBars,

    // Track shape errors (E005-E007)
    /// E005: Notes and durations arrays differ in length
    NoteDurationMismatch,
    /// E006: Melodic track has no notes or no durations
    MissingNotes,
    /// E007: Drum track has no pattern
    MissingPattern,

    // Track value errors (E008-E015)
    /// E008: Unrecognized note name
    InvalidNote,
    /// E009: Pattern velocity outside [0, 1]
    InvalidVelocity,
    /// E010: Track volume outside [0, 1]
    InvalidVolume,
    /// E011: Pitch-bend bend_notes count differs from notes count
    BendNoteMismatch,
    /// E012: Cumulative durations exceed the section length
    DurationExceedsSection,
    /// E013: A note duration is zero or negative
    NonPositiveDuration,
    /// E014: Sidechain strength outside [0, 1]
    InvalidSidechainStrength,
    /// E015: Supersaw voice count is zero
    InvalidVoiceCount,

    // Render limits (E016)
    /// E016: Score is longer than the renderer allows
    ScoreTooLong,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NoSections => "E001",
            ErrorCode::InvalidTempo => "E002",
            ErrorCode::InvalidSampleRate => "E003",
            ErrorCode::InvalidBars => "E004",
            ErrorCode::NoteDurationMismatch => "E005",
            ErrorCode::MissingNotes => "E006",
            ErrorCode::MissingPattern => "E007",
            ErrorCode::InvalidNote => "E008",
            ErrorCode::InvalidVelocity => "E009",
            ErrorCode::InvalidVolume => "E010",
            ErrorCode::BendNoteMismatch => "E011",
            ErrorCode::DurationExceedsSection => "E012",
            ErrorCode::NonPositiveDuration => "E013",
            ErrorCode::InvalidSidechainStrength => "E014",
            ErrorCode::InvalidVoiceCount => "E015",
            ErrorCode::ScoreTooLong => "E016",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for score validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Tempo outside the usual range
    UnusualTempo,
    /// W002: Section has no tracks
    EmptySection,
    /// W003: Pattern length does not divide the section's beat count
    UnevenPattern,
    /// W004: Cumulative durations much shorter than the section
    ShortSequence,
    /// W005: Unknown sidechain style
    UnknownSidechainStyle,
    /// W006: Unknown automation curve
    UnknownAutomation,
    /// W007: Unknown pitch-bend bass style
    UnknownBassStyle,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::UnusualTempo => "W001",
            WarningCode::EmptySection => "W002",
            WarningCode::UnevenPattern => "W003",
            WarningCode::ShortSequence => "W004",
            WarningCode::UnknownSidechainStyle => "W005",
            WarningCode::UnknownAutomation => "W006",
            WarningCode::UnknownBassStyle => "W007",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional score path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field (e.g., "sections\[0\].tracks\[1\]").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a score path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional score path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a score path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for score operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Score validation failed with one or more errors.
    #[error("score validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// YAML parsing error (includes missing fields and unknown roles).
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error (includes missing fields and unknown roles).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The score file extension is not recognized.
    #[error("unsupported score extension '{0}' (expected .yml, .yaml, or .json)")]
    UnsupportedExtension(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of score validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns true if any error carries the given code.
    pub fn has_error(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Returns true if any warning carries the given code.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}
