//! Error types for the rendering engine.

use dropforge_spec::InvalidNote;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can abort a render.
///
/// Degenerate durations and out-of-range filter parameters are not errors;
/// they are clamped or short-circuited where they occur.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A note token could not be resolved to a frequency.
    #[error(transparent)]
    InvalidNote(#[from] InvalidNote),

    /// Tempo is not a positive number.
    #[error("invalid tempo: {tempo} BPM")]
    InvalidTempo {
        /// The invalid tempo.
        tempo: f64,
    },

    /// Sample rate is zero.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// The score would need a master buffer longer than the render limit.
    #[error("score lasts {seconds:.0}s, longer than the {limit}s render limit")]
    ScoreTooLong {
        /// Total score length in seconds.
        seconds: f64,
        /// The limit in seconds.
        limit: f64,
    },

    /// I/O error while writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Returns the stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidNote(_) => "ENGINE_001",
            EngineError::InvalidTempo { .. } => "ENGINE_002",
            EngineError::InvalidSampleRate { .. } => "ENGINE_003",
            EngineError::Io(_) => "ENGINE_004",
            EngineError::ScoreTooLong { .. } => "ENGINE_005",
        }
    }
}
