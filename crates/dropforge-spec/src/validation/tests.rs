//! Validation tests.

use super::*;
use crate::score::PatternStep;

fn make_valid_score() -> Score {
    Score::new(128.0).section(
        Section::new("drop", 2)
            .track(Track::drum(InstrumentRole::Kick, [1.0, 0.0, 1.0, 0.0]).with_volume(0.9))
            .track(
                Track::melodic(InstrumentRole::Melody, ["C4", "E4", "G4", "rest"], [2.0; 4])
                    .with_volume(0.5),
            ),
    )
}

fn messages(result: &ValidationResult) -> Vec<String> {
    result.errors.iter().map(|e| e.message.clone()).collect()
}

fn warning_messages(result: &ValidationResult) -> Vec<String> {
    result.warnings.iter().map(|w| w.message.clone()).collect()
}

fn single_track(bars: u32, track: Track) -> Score {
    Score::new(128.0).section(Section::new("test", bars).track(track))
}

#[test]
fn test_valid_score() {
    let result = validate_score(&make_valid_score());
    assert!(result.is_ok(), "errors: {:?}", result.errors);
    assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
}

#[test]
fn test_no_sections() {
    let result = validate_score(&Score::new(128.0));
    assert!(result.has_error(ErrorCode::NoSections));
    assert!(messages(&result)
        .iter()
        .any(|m| m.contains("No sections defined")));
}

#[test]
fn test_non_positive_tempo() {
    for tempo in [0.0, -10.0, f64::NAN] {
        let mut score = make_valid_score();
        score.tempo = tempo;
        let result = validate_score(&score);
        assert!(result.has_error(ErrorCode::InvalidTempo), "tempo {}", tempo);
        assert!(!result.has_warning(WarningCode::UnusualTempo));
    }
}

#[test]
fn test_zero_sample_rate() {
    let score = make_valid_score().with_sample_rate(0);
    assert!(validate_score(&score).has_error(ErrorCode::InvalidSampleRate));
}

#[test]
fn test_zero_bars() {
    let score = Score::new(128.0).section(Section::new("empty", 0));
    let result = validate_score(&score);
    assert!(result.has_error(ErrorCode::InvalidBars));
    assert_eq!(result.errors[0].path.as_deref(), Some("sections[0].bars"));
}

#[test]
fn test_duration_exceeds_section() {
    let score = single_track(
        2,
        Track::melodic(InstrumentRole::Melody, ["C4", "D4"], [8.0, 8.0]).with_volume(0.5),
    );
    let result = validate_score(&score);
    assert!(result.has_error(ErrorCode::DurationExceedsSection));
    assert!(messages(&result)
        .iter()
        .any(|m| m.contains("exceeds section length")));
}

#[test]
fn test_notes_durations_mismatch() {
    let score = single_track(
        4,
        Track::melodic(InstrumentRole::Melody, ["C4", "D4", "E4"], [4.0, 4.0]).with_volume(0.5),
    );
    let result = validate_score(&score);
    assert!(result.has_error(ErrorCode::NoteDurationMismatch));
    assert!(messages(&result)
        .iter()
        .any(|m| m.contains("arrays don't match")));
}

#[test]
fn test_missing_notes() {
    let mut track = Track::new(InstrumentRole::Bass);
    track.durations = vec![1.0];
    let result = validate_score(&single_track(1, track));
    assert!(result.has_error(ErrorCode::MissingNotes));
    assert!(messages(&result)
        .iter()
        .any(|m| m.contains("Missing required field 'notes'")));
}

#[test]
fn test_missing_pattern() {
    let result = validate_score(&single_track(1, Track::new(InstrumentRole::Hihat)));
    assert!(result.has_error(ErrorCode::MissingPattern));
    assert!(messages(&result)
        .iter()
        .any(|m| m.contains("Missing required field 'pattern'")));
}

#[test]
fn test_invalid_note_names_each_reported() {
    let score = single_track(
        2,
        Track::melodic(InstrumentRole::Melody, ["C4", "InvalidNote", "Z9"], [2.0; 3])
            .with_volume(0.5),
    );
    let result = validate_score(&score);
    let invalid: Vec<_> = messages(&result)
        .into_iter()
        .filter(|m| m.contains("invalid note"))
        .collect();
    assert_eq!(invalid.len(), 2);
    assert_eq!(
        result.errors[0].path.as_deref(),
        Some("sections[0].tracks[0].notes[1]")
    );
}

#[test]
fn test_rests_and_flats_are_valid() {
    let score = single_track(
        4,
        Track::melodic(
            InstrumentRole::Melody,
            ["C4", "rest", "", "Bb3", "Ab4", "Eb5", "Db2", "D4"],
            [2.0; 8],
        )
        .with_volume(0.5),
    );
    let result = validate_score(&score);
    assert!(!result.has_error(ErrorCode::InvalidNote), "{:?}", result.errors);
}

#[test]
fn test_invalid_pattern_velocity() {
    let score = single_track(
        2,
        Track::drum(InstrumentRole::Kick, [1.0, 0.0, 2.0, -0.5]).with_volume(0.8),
    );
    let result = validate_score(&score);
    let velocity_errors: Vec<_> = messages(&result)
        .into_iter()
        .filter(|m| m.contains("velocity value"))
        .collect();
    assert_eq!(velocity_errors.len(), 2);
}

#[test]
fn test_boolean_pattern_is_valid() {
    let score = single_track(1, Track::drum(InstrumentRole::Clap, [false, true, false, true]));
    let result = validate_score(&score);
    assert!(result.is_ok(), "{:?}", result.errors);
    assert_eq!(score.sections[0].tracks[0].pattern[1], PatternStep::Flag(true));
}

#[test]
fn test_invalid_volume() {
    let score = Score::new(128.0).section(
        Section::new("test", 2)
            .track(Track::drum(InstrumentRole::Kick, [1.0, 0.0]).with_volume(1.5))
            .track(Track::drum(InstrumentRole::Snare, [0.0, 1.0]).with_volume(-0.1)),
    );
    let result = validate_score(&score);
    let volume_errors: Vec<_> = messages(&result)
        .into_iter()
        .filter(|m| m.contains("invalid volume"))
        .collect();
    assert_eq!(volume_errors.len(), 2);
}

#[test]
fn test_pitch_bend_mismatch() {
    let mut track =
        Track::melodic(InstrumentRole::PitchBendBass, ["A1", "B1", "C2"], [2.0; 3]).with_volume(0.7);
    track.bend_notes = vec!["A#1".to_string()];
    let result = validate_score(&single_track(2, track));
    assert!(result.has_error(ErrorCode::BendNoteMismatch));
    assert!(messages(&result)
        .iter()
        .any(|m| m.contains("bend_notes") && m.contains("must match")));
}

#[test]
fn test_invalid_bend_note() {
    let mut track = Track::melodic(InstrumentRole::PitchBendBass, ["A1"], [4.0]);
    track.bend_notes = vec!["X1".to_string()];
    let result = validate_score(&single_track(1, track));
    assert!(result.has_error(ErrorCode::InvalidNote));
    assert_eq!(
        result.errors[0].path.as_deref(),
        Some("sections[0].tracks[0].bend_notes[0]")
    );
}

#[test]
fn test_unknown_bass_style_warning() {
    let mut track = Track::melodic(InstrumentRole::PitchBendBass, ["A1"], [4.0]);
    track.bass_style = Some("growl".to_string());
    let result = validate_score(&single_track(1, track));
    assert!(result.is_ok());
    assert!(result.has_warning(WarningCode::UnknownBassStyle));
}

#[test]
fn test_non_positive_duration() {
    let score = single_track(
        1,
        Track::melodic(InstrumentRole::Bass, ["C2", "D2"], [0.0, 2.0]),
    );
    assert!(validate_score(&score).has_error(ErrorCode::NonPositiveDuration));
}

#[test]
fn test_unusual_tempo_warning() {
    for (tempo, warns) in [(50.0, true), (250.0, true), (128.0, false), (60.0, false)] {
        let mut score = make_valid_score();
        score.tempo = tempo;
        let result = validate_score(&score);
        assert_eq!(
            warning_messages(&result)
                .iter()
                .any(|m| m.contains("Unusual tempo")),
            warns,
            "tempo {}",
            tempo
        );
    }
}

#[test]
fn test_short_duration_warning() {
    let score = single_track(
        8,
        Track::melodic(InstrumentRole::Melody, ["C4", "D4"], [4.0, 4.0]).with_volume(0.5),
    );
    let result = validate_score(&score);
    assert!(result.is_ok());
    assert!(warning_messages(&result)
        .iter()
        .any(|m| m.contains("much shorter than section")));
}

#[test]
fn test_pattern_division_warning() {
    let score = single_track(
        4,
        Track::drum(InstrumentRole::Kick, [1.0, 0.0, 1.0, 0.0, 1.0]).with_volume(0.8),
    );
    let result = validate_score(&score);
    assert!(warning_messages(&result)
        .iter()
        .any(|m| m.contains("doesn't divide evenly")));
}

#[test]
fn test_unknown_sidechain_style_warning() {
    let score = make_valid_score().with_sidechain("unknown_style", 0.7);
    let result = validate_score(&score);
    assert!(result.is_ok());
    assert!(warning_messages(&result)
        .iter()
        .any(|m| m.contains("Unknown sidechain_style")));
}

#[test]
fn test_invalid_sidechain_strength() {
    let score = make_valid_score().with_sidechain("pump", 1.5);
    let result = validate_score(&score);
    assert!(messages(&result)
        .iter()
        .any(|m| m.contains("Invalid sidechain_strength")));
}

#[test]
fn test_sidechain_settings_ignored_when_disabled() {
    let mut score = make_valid_score();
    score.sidechain_style = "wobble".to_string();
    score.sidechain_strength = 3.0;
    let result = validate_score(&score);
    assert!(result.is_ok());
    assert!(!result.has_warning(WarningCode::UnknownSidechainStyle));
}

#[test]
fn test_empty_tracks_warning() {
    let score = Score::new(128.0).section(Section::new("empty_section", 4));
    let result = validate_score(&score);
    assert!(result.is_ok());
    assert!(warning_messages(&result)
        .iter()
        .any(|m| m.contains("no tracks defined")));
}

#[test]
fn test_unknown_automation_warning() {
    let track = Track::melodic(InstrumentRole::Pad, ["C4"], [4.0]).with_automation("wobble", 1.0);
    let result = validate_score(&single_track(1, track));
    assert!(result.has_warning(WarningCode::UnknownAutomation));
}

#[test]
fn test_zero_supersaw_voices() {
    let mut track = Track::melodic(InstrumentRole::Supersaw, ["C4"], [4.0]);
    track.voices = Some(0);
    assert!(validate_score(&single_track(1, track)).has_error(ErrorCode::InvalidVoiceCount));
}

#[test]
fn test_effects_need_no_lists() {
    let score = Score::new(128.0).section(
        Section::new("build", 4)
            .track(Track::new(InstrumentRole::Sweep))
            .track(Track::new(InstrumentRole::WhiteNoiseRiser))
            .track(Track::new(InstrumentRole::Impact)),
    );
    let result = validate_score(&score);
    assert!(result.is_ok(), "{:?}", result.errors);
}

#[test]
fn test_multiple_errors_reported() {
    let score = Score::new(128.0).section(
        Section::new("broken", 2)
            .track(Track::drum(InstrumentRole::Kick, [3.0]).with_volume(2.0))
            .track(Track::melodic(InstrumentRole::Bass, ["Q1"], [16.0])),
    );
    let result = validate_score(&score);
    assert!(result.has_error(ErrorCode::InvalidVelocity));
    assert!(result.has_error(ErrorCode::InvalidVolume));
    assert!(result.has_error(ErrorCode::InvalidNote));
    assert!(result.has_error(ErrorCode::DurationExceedsSection));
    assert_eq!(result.errors.len(), 4);
}

#[test]
fn test_decimal_durations_fill_bar_exactly() {
    // 20 × 0.2 sums to 4.000000000000001 in binary floating point.
    let track = Track::melodic(InstrumentRole::Melody, ["C4"; 20], [0.2; 20]);
    let result = validate_score(&single_track(1, track));
    assert!(result.is_ok(), "errors: {:?}", result.errors);
    assert!(!result.has_warning(WarningCode::ShortSequence));

    let over = Track::melodic(InstrumentRole::Melody, ["C4"; 21], [0.2; 21]);
    assert!(validate_score(&single_track(1, over)).has_error(ErrorCode::DurationExceedsSection));
}

#[test]
fn test_half_section_sequence_is_not_short() {
    let track = Track::melodic(InstrumentRole::Pad, ["C4"; 10], [0.2; 10]);
    let result = validate_score(&single_track(1, track));
    assert!(result.is_ok(), "errors: {:?}", result.errors);
    assert!(!result.has_warning(WarningCode::ShortSequence));
}

#[test]
fn test_huge_bar_count_is_rejected_without_overflow() {
    let score = single_track(u32::MAX, Track::drum(InstrumentRole::Kick, [1.0, 0.0, 1.0]));
    let result = validate_score(&score);
    assert!(result.has_error(ErrorCode::ScoreTooLong));
    assert_eq!(Section::new("a", u32::MAX).beats(), 4 * u32::MAX as u64);
}

#[test]
fn test_score_length_limit() {
    // One bar at 128 BPM lasts 1.875 s.
    let kick = || Track::drum(InstrumentRole::Kick, [1.0, 0.0, 1.0, 0.0]);
    assert!(validate_score(&single_track(1920, kick())).is_ok());

    let result = validate_score(&single_track(1921, kick()));
    assert!(result.has_error(ErrorCode::ScoreTooLong));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].path.as_deref(), Some("sections"));
}
