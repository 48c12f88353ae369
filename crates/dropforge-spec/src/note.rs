//! Note name to frequency conversion.
//!
//! Note tokens are a letter `A`-`G` (any case), an optional `#` (sharp) or
//! `b` (flat) modifier, and an optional single octave digit that defaults to 4.
//! Frequencies are equal-tempered against A4 = 440 Hz.
//!
//! A flat is resolved to the sharp one semitone below its letter, wrapping
//! modulo 12 without touching the octave digit. `Cb4` therefore lands on the
//! pitch class `B` *within octave 4* (the same frequency as `B4`), not on `B3`.

use thiserror::Error;

/// Reference pitch for A4 in Hz.
pub const A4_FREQ: f64 = 440.0;

/// Octave used when a token carries no octave digit.
pub const DEFAULT_OCTAVE: i32 = 4;

/// Tokens that denote silence.
pub const REST_TOKENS: [&str; 2] = ["rest", ""];

/// Sharp-spelled pitch classes, indexed by semitone above C.
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Semitone index of A within an octave.
const A_SEMITONE: i32 = 9;

/// An unrecognized note token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid note '{note}'")]
pub struct InvalidNote {
    /// The offending token.
    pub note: String,
}

impl InvalidNote {
    fn new(note: &str) -> Self {
        Self {
            note: note.to_string(),
        }
    }
}

/// A parsed, pitched note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    /// Semitone above C (0-11).
    pub semitone: i32,
    /// Octave number; 4 is the reference octave.
    pub octave: i32,
}

impl Pitch {
    /// Frequency of this pitch in Hz.
    pub fn frequency(&self) -> f64 {
        let exponent = (self.octave - DEFAULT_OCTAVE) as f64
            + (self.semitone - A_SEMITONE) as f64 / 12.0;
        A4_FREQ * 2.0_f64.powf(exponent)
    }
}

/// Returns true if the token denotes a rest.
pub fn is_rest(token: &str) -> bool {
    REST_TOKENS.contains(&token)
}

/// Parses a note token.
///
/// Returns `Ok(None)` for rests and `Ok(Some(pitch))` for pitched notes.
pub fn parse_note(token: &str) -> Result<Option<Pitch>, InvalidNote> {
    if is_rest(token) {
        return Ok(None);
    }

    let chars: Vec<char> = token.chars().collect();
    let (name, octave) = match chars.split_last() {
        Some((last, rest)) if last.is_ascii_digit() => {
            (rest, last.to_digit(10).map(|d| d as i32).unwrap_or(DEFAULT_OCTAVE))
        }
        _ => (&chars[..], DEFAULT_OCTAVE),
    };

    let letter = match name.first() {
        Some(c) => c.to_ascii_uppercase(),
        None => return Err(InvalidNote::new(token)),
    };
    let base = PITCH_CLASSES
        .iter()
        .position(|pc| pc.len() == 1 && pc.starts_with(letter))
        .ok_or_else(|| InvalidNote::new(token))? as i32;

    let semitone = match &name[1..] {
        [] => base,
        ['b'] | ['B'] => (base - 1).rem_euclid(12),
        ['#'] => {
            let sharp = format!("{}#", letter);
            PITCH_CLASSES
                .iter()
                .position(|pc| *pc == sharp)
                .ok_or_else(|| InvalidNote::new(token))? as i32
        }
        _ => return Err(InvalidNote::new(token)),
    };

    Ok(Some(Pitch { semitone, octave }))
}

/// Resolves a note token to a frequency in Hz.
///
/// Rests resolve to 0 Hz.
///
/// # Examples
/// ```
/// use dropforge_spec::note::note_to_freq;
///
/// assert!((note_to_freq("A4").unwrap() - 440.0).abs() < 1e-9);
/// assert_eq!(note_to_freq("rest").unwrap(), 0.0);
/// assert!(note_to_freq("H2").is_err());
/// ```
pub fn note_to_freq(token: &str) -> Result<f64, InvalidNote> {
    Ok(parse_note(token)?.map_or(0.0, |pitch| pitch.frequency()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(token: &str) -> f64 {
        note_to_freq(token).unwrap()
    }

    #[test]
    fn test_a4_reference() {
        assert!((freq("A4") - 440.0).abs() < 1e-9);
        assert!((freq("A") - 440.0).abs() < 1e-9);
    }

    #[test]
    fn test_octave_doubles_frequency() {
        for pc in PITCH_CLASSES {
            for octave in 0..8 {
                let low = freq(&format!("{}{}", pc, octave));
                let high = freq(&format!("{}{}", pc, octave + 1));
                assert!(
                    (high - 2.0 * low).abs() < 1e-9,
                    "{}{} -> {}{}",
                    pc,
                    octave,
                    pc,
                    octave + 1
                );
            }
        }
    }

    #[test]
    fn test_rest_is_silent() {
        assert_eq!(freq("rest"), 0.0);
        assert_eq!(freq(""), 0.0);
    }

    #[test]
    fn test_chromatic_scale_strictly_increasing() {
        let freqs: Vec<f64> = PITCH_CLASSES
            .iter()
            .map(|pc| freq(&format!("{}4", pc)))
            .collect();
        for pair in freqs.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_enharmonic_flats() {
        let pairs = [
            ("Db4", "C#4"),
            ("Eb4", "D#4"),
            ("Gb4", "F#4"),
            ("Ab4", "G#4"),
            ("Bb4", "A#4"),
            ("Bb2", "A#2"),
        ];
        for (flat, sharp) in pairs {
            assert!((freq(flat) - freq(sharp)).abs() < 1e-9, "{} != {}", flat, sharp);
        }
        // Flats on natural half steps land on the neighbouring natural.
        assert!((freq("Fb4") - freq("E4")).abs() < 1e-9);
    }

    #[test]
    fn test_case_insensitive_letters() {
        assert_eq!(freq("c4"), freq("C4"));
        assert_eq!(freq("f#3"), freq("F#3"));
        assert_eq!(freq("bb3"), freq("A#3"));
        assert_eq!(freq("BB3"), freq("A#3"));
    }

    #[test]
    fn test_flat_c_wraps_within_octave() {
        // Known boundary case: the semitone index wraps but the octave digit
        // is kept, so Cb4 sounds like B4 rather than B3.
        assert!((freq("Cb4") - freq("B4")).abs() < 1e-9);
        assert!(freq("Cb4") > freq("C4"));
    }

    #[test]
    fn test_invalid_notes() {
        for token in ["H4", "Z9", "InvalidNote", "E#4", "B#", "C-1", "C10", "#4", "Cbb4"] {
            assert_eq!(
                note_to_freq(token),
                Err(InvalidNote {
                    note: token.to_string()
                }),
                "{} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_invalid_note_message() {
        let err = note_to_freq("Q4").unwrap_err();
        assert_eq!(err.to_string(), "invalid note 'Q4'");
    }

    #[test]
    fn test_parse_note_components() {
        assert_eq!(
            parse_note("G#2").unwrap(),
            Some(Pitch {
                semitone: 8,
                octave: 2
            })
        );
        assert_eq!(parse_note("rest").unwrap(), None);
    }
}
