//! Score validation logic.
//!
//! Validation collects every problem it finds instead of stopping at the
//! first. Errors block rendering; warnings describe scores that render but
//! probably not the way the author intended.

#[cfg(test)]
mod tests;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::note::parse_note;
use crate::score::{
    InstrumentRole, RoleCategory, Score, Section, Track, AUTOMATION_CURVES, BASS_STYLES,
    MAX_DURATION_SECONDS, SIDECHAIN_STYLES,
};

/// Tempo range that does not trigger a warning, in BPM.
pub const USUAL_TEMPO_RANGE: (f64, f64) = (60.0, 200.0);

/// Fraction of the section a note sequence must cover to avoid a warning.
const SHORT_SEQUENCE_RATIO: f64 = 0.5;

/// Relative slack for comparing summed durations against a section length.
const BEAT_TOLERANCE: f64 = 1e-9;

/// Beat-count comparison that absorbs rounding in summed decimal durations.
fn beats_exceed(total: f64, limit: f64) -> bool {
    total > limit + BEAT_TOLERANCE * limit.max(1.0)
}

/// Validates a score and returns a validation result.
///
/// # Example
/// ```
/// use dropforge_spec::{InstrumentRole, Score, Section, Track};
/// use dropforge_spec::validation::validate_score;
///
/// let score = Score::new(128.0).section(
///     Section::new("intro", 1).track(Track::drum(InstrumentRole::Kick, [1.0, 0.0, 1.0, 0.0])),
/// );
///
/// let result = validate_score(&score);
/// assert!(result.is_ok());
/// ```
pub fn validate_score(score: &Score) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_global(score, &mut result);

    if score.sections.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoSections,
            "No sections defined in score",
            "sections",
        ));
    }

    for (section_index, section) in score.sections.iter().enumerate() {
        validate_section(section, section_index, &mut result);
    }

    validate_length(score, &mut result);

    result
}

/// Rejects scores whose master buffer would be unreasonably large.
fn validate_length(score: &Score, result: &mut ValidationResult) {
    if !(score.tempo > 0.0) {
        return;
    }
    let total = score.total_duration();
    if total > MAX_DURATION_SECONDS {
        result.add_error(ValidationError::with_path(
            ErrorCode::ScoreTooLong,
            format!(
                "score lasts {:.0} seconds, longer than the {} second limit",
                total, MAX_DURATION_SECONDS
            ),
            "sections",
        ));
    }
}

/// Validates tempo, sample rate, and sidechain settings.
fn validate_global(score: &Score, result: &mut ValidationResult) {
    if !(score.tempo > 0.0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTempo,
            format!("tempo must be positive, got {}", score.tempo),
            "tempo",
        ));
    } else if score.tempo < USUAL_TEMPO_RANGE.0 || score.tempo > USUAL_TEMPO_RANGE.1 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::UnusualTempo,
            format!(
                "Unusual tempo {} BPM (typical range is {}-{})",
                score.tempo, USUAL_TEMPO_RANGE.0, USUAL_TEMPO_RANGE.1
            ),
            "tempo",
        ));
    }

    if score.sample_rate == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleRate,
            "sample_rate must be positive",
            "sample_rate",
        ));
    }

    if !score.sidechain {
        return;
    }

    if !SIDECHAIN_STYLES.contains(&score.sidechain_style.as_str()) {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::UnknownSidechainStyle,
            format!(
                "Unknown sidechain_style '{}', falling back to 'subtle' (expected one of {})",
                score.sidechain_style,
                SIDECHAIN_STYLES.join(", ")
            ),
            "sidechain_style",
        ));
    }

    if !(0.0..=1.0).contains(&score.sidechain_strength) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSidechainStrength,
            format!(
                "Invalid sidechain_strength {} (must be between 0 and 1)",
                score.sidechain_strength
            ),
            "sidechain_strength",
        ));
    }
}

fn validate_section(section: &Section, section_index: usize, result: &mut ValidationResult) {
    let path = format!("sections[{}]", section_index);

    if section.bars == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidBars,
            format!("Section '{}': bars must be at least 1", section.name),
            format!("{}.bars", path),
        ));
    }

    if section.tracks.is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptySection,
            format!("Section '{}' has no tracks defined", section.name),
            format!("{}.tracks", path),
        ));
    }

    for (track_index, track) in section.tracks.iter().enumerate() {
        let ctx = TrackContext {
            label: format!(
                "Section '{}', track {} ({})",
                section.name, track_index, track.role
            ),
            path: format!("{}.tracks[{}]", path, track_index),
            section_beats: section.beats(),
        };
        validate_track(track, &ctx, result);
    }
}

/// Location information shared by every check on one track.
struct TrackContext {
    label: String,
    path: String,
    section_beats: u64,
}

impl TrackContext {
    fn error(&self, code: ErrorCode, message: String, field: &str) -> ValidationError {
        ValidationError::with_path(
            code,
            format!("{}: {}", self.label, message),
            format!("{}.{}", self.path, field),
        )
    }

    fn warning(&self, code: WarningCode, message: String, field: &str) -> ValidationWarning {
        ValidationWarning::with_path(
            code,
            format!("{}: {}", self.label, message),
            format!("{}.{}", self.path, field),
        )
    }
}

fn validate_track(track: &Track, ctx: &TrackContext, result: &mut ValidationResult) {
    if !(0.0..=1.0).contains(&track.volume) {
        result.add_error(ctx.error(
            ErrorCode::InvalidVolume,
            format!("invalid volume {} (must be between 0 and 1)", track.volume),
            "volume",
        ));
    }

    if let Some(ref curve) = track.automation {
        if !AUTOMATION_CURVES.contains(&curve.as_str()) {
            result.add_warning(ctx.warning(
                WarningCode::UnknownAutomation,
                format!(
                    "Unknown automation '{}', applying unity gain (expected one of {})",
                    curve,
                    AUTOMATION_CURVES.join(", ")
                ),
                "automation",
            ));
        }
    }

    match track.role.category() {
        RoleCategory::Drum => validate_pattern(track, ctx, result),
        RoleCategory::Melodic => validate_sequence(track, ctx, result),
        RoleCategory::SectionFx | RoleCategory::PointFx => {}
    }

    if track.role == InstrumentRole::PitchBendBass {
        validate_pitch_bend(track, ctx, result);
    }

    if track.role == InstrumentRole::Supersaw && track.voices() == 0 {
        result.add_error(ctx.error(
            ErrorCode::InvalidVoiceCount,
            "voices must be at least 1".to_string(),
            "voices",
        ));
    }
}

fn validate_pattern(track: &Track, ctx: &TrackContext, result: &mut ValidationResult) {
    if track.pattern.is_empty() {
        result.add_error(ctx.error(
            ErrorCode::MissingPattern,
            "Missing required field 'pattern'".to_string(),
            "pattern",
        ));
        return;
    }

    for (i, step) in track.pattern.iter().enumerate() {
        let velocity = step.velocity();
        if !(0.0..=1.0).contains(&velocity) {
            result.add_error(ctx.error(
                ErrorCode::InvalidVelocity,
                format!(
                    "invalid velocity value {} at step {} (must be between 0 and 1)",
                    velocity, i
                ),
                &format!("pattern[{}]", i),
            ));
        }
    }

    let steps = track.pattern.len() as u64;
    if ctx.section_beats > 0 && ctx.section_beats % steps != 0 {
        result.add_warning(ctx.warning(
            WarningCode::UnevenPattern,
            format!(
                "pattern length {} doesn't divide evenly into {} beats",
                steps, ctx.section_beats
            ),
            "pattern",
        ));
    }
}

fn validate_sequence(track: &Track, ctx: &TrackContext, result: &mut ValidationResult) {
    if track.notes.is_empty() || track.durations.is_empty() {
        let missing = if track.notes.is_empty() {
            "notes"
        } else {
            "durations"
        };
        result.add_error(ctx.error(
            ErrorCode::MissingNotes,
            format!("Missing required field '{}'", missing),
            missing,
        ));
        return;
    }

    if track.notes.len() != track.durations.len() {
        result.add_error(ctx.error(
            ErrorCode::NoteDurationMismatch,
            format!(
                "notes ({}) and durations ({}) arrays don't match",
                track.notes.len(),
                track.durations.len()
            ),
            "durations",
        ));
    }

    validate_note_tokens(&track.notes, "notes", ctx, result);

    for (i, duration) in track.durations.iter().enumerate() {
        if !(*duration > 0.0) {
            result.add_error(ctx.error(
                ErrorCode::NonPositiveDuration,
                format!("duration {} at index {} must be positive", duration, i),
                &format!("durations[{}]", i),
            ));
        }
    }

    let total_beats = track.total_beats();
    let section_beats = ctx.section_beats as f64;
    if beats_exceed(total_beats, section_beats) {
        result.add_error(ctx.error(
            ErrorCode::DurationExceedsSection,
            format!(
                "total duration {} beats exceeds section length of {} beats",
                total_beats, section_beats
            ),
            "durations",
        ));
    } else if beats_exceed(section_beats * SHORT_SEQUENCE_RATIO, total_beats) {
        result.add_warning(ctx.warning(
            WarningCode::ShortSequence,
            format!(
                "total duration {} beats is much shorter than section ({} beats); the sequence will loop",
                total_beats, section_beats
            ),
            "durations",
        ));
    }
}

fn validate_pitch_bend(track: &Track, ctx: &TrackContext, result: &mut ValidationResult) {
    if !track.bend_notes.is_empty() && track.bend_notes.len() != track.notes.len() {
        result.add_error(ctx.error(
            ErrorCode::BendNoteMismatch,
            format!(
                "bend_notes count ({}) must match notes count ({})",
                track.bend_notes.len(),
                track.notes.len()
            ),
            "bend_notes",
        ));
    }

    validate_note_tokens(&track.bend_notes, "bend_notes", ctx, result);

    if !BASS_STYLES.contains(&track.bass_style()) {
        result.add_warning(ctx.warning(
            WarningCode::UnknownBassStyle,
            format!(
                "Unknown bass_style '{}', using a plain sine (expected one of {})",
                track.bass_style(),
                BASS_STYLES.join(", ")
            ),
            "bass_style",
        ));
    }
}

fn validate_note_tokens(
    tokens: &[String],
    field: &str,
    ctx: &TrackContext,
    result: &mut ValidationResult,
) {
    for (i, token) in tokens.iter().enumerate() {
        if let Err(err) = parse_note(token) {
            result.add_error(ctx.error(
                ErrorCode::InvalidNote,
                format!("{} in {}", err, field),
                &format!("{}[{}]", field, i),
            ));
        }
    }
}
