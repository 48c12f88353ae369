//! Dropforge Score Library
//!
//! This crate provides the score document model, note-name parsing, loading,
//! and validation for Dropforge. A score is a YAML or JSON document describing
//! a tempo, a list of sections, and per-section instrument tracks.
//!
//! # Example
//!
//! ```
//! use dropforge_spec::{InstrumentRole, Score, Section, Track};
//! use dropforge_spec::validation::validate_score;
//!
//! let score = Score::from_yaml_str(
//!     r#"
//! tempo: 128
//! sections:
//!   - name: drop
//!     bars: 1
//!     tracks:
//!       - type: kick
//!         pattern: [1, 0, 1, 0]
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(score.sections[0].tracks[0].role, InstrumentRole::Kick);
//! assert!(validate_score(&score).is_ok());
//!
//! // Scores can also be built in code.
//! let built = Score::new(128.0)
//!     .section(Section::new("drop", 1).track(Track::drum(InstrumentRole::Kick, [1.0, 0.0, 1.0, 0.0])));
//! assert_eq!(built.sections[0].tracks[0].pattern, score.sections[0].tracks[0].pattern);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types for validation
//! - [`input`]: Loading scores from YAML or JSON files
//! - [`note`]: Note name to frequency conversion
//! - [`score`]: Score, section, and track types
//! - [`validation`]: Score validation functions

pub mod error;
pub mod input;
pub mod note;
pub mod score;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{
    ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use input::{load_score, LoadResult, ScoreFormat};
pub use note::{is_rest, note_to_freq, parse_note, InvalidNote, Pitch};
pub use score::{
    InstrumentRole, PatternStep, RoleCategory, Score, Section, Track, BEATS_PER_BAR,
    DEFAULT_SAMPLE_RATE, MAX_DURATION_SECONDS,
};
pub use validation::validate_score;
