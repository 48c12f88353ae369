//! Voice generators, one per instrument role.
//!
//! Each module groups related voices:
//! - `drums` - Kick, hi-hat, snare, clap, percussion
//! - `tonal` - Sine/saw bass, sub bass, melody, pad, arpeggio
//! - `karplus` - Karplus-Strong plucked string
//! - `supersaw` - Detuned saw stack
//! - `bass` - Future, reese, pluck, dubstep, and pitch-bend bass
//! - `fx` - Sweep, white-noise riser, impact
//!
//! [`voice_for`] maps a track's role and parameters onto a [`Voice`], the
//! closed set of generators the timeline renders.

pub mod bass;
pub mod drums;
pub mod fx;
pub mod karplus;
pub mod supersaw;
pub mod tonal;

use dropforge_spec::{InstrumentRole, Track};
use rand_pcg::Pcg32;

use crate::oscillator::sample_count;

pub use bass::{BassStyle, DubstepBass, FutureBass, PitchBendBass, PluckBass, ReeseBass};
pub use drums::{Clap, HiHat, Kick, Percussion, Snare};
pub use fx::{Impact, Sweep, WhiteNoiseRiser};
pub use karplus::Pluck;
pub use supersaw::Supersaw;
pub use tonal::{Arp, Bass, Melody, Pad, SubBass};

/// Common trait for all voice generators.
pub trait Synthesizer {
    /// Generates audio samples.
    ///
    /// # Arguments
    /// * `num_samples` - Number of samples to generate
    /// * `sample_rate` - Audio sample rate in Hz
    /// * `rng` - Deterministic RNG for any randomness
    ///
    /// # Returns
    /// Vector of `num_samples` audio samples, roughly in [-1.0, 1.0]
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64>;
}

/// An all-zero buffer.
pub(crate) fn silence(num_samples: usize) -> Vec<f64> {
    vec![0.0; num_samples]
}

/// A configured voice for one instrument role.
#[derive(Debug, Clone)]
pub enum Voice {
    Kick(Kick),
    HiHat(HiHat),
    Snare(Snare),
    Clap(Clap),
    Percussion(Percussion),
    Bass(Bass),
    SubBass(SubBass),
    Melody(Melody),
    Pad(Pad),
    Pluck(Pluck),
    Arp(Arp),
    Supersaw(Supersaw),
    FutureBass(FutureBass),
    ReeseBass(ReeseBass),
    PluckBass(PluckBass),
    DubstepBass(DubstepBass),
    PitchBendBass(PitchBendBass),
    Sweep(Sweep),
    WhiteNoiseRiser(WhiteNoiseRiser),
    Impact(Impact),
}

impl Voice {
    /// Renders `duration` seconds of this voice.
    ///
    /// The buffer holds `round(duration × sample_rate)` samples; a zero or
    /// negative duration gives an empty buffer without touching the RNG.
    pub fn render(&self, duration: f64, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let num_samples = sample_count(duration, sample_rate);
        if num_samples == 0 {
            return Vec::new();
        }
        self.synthesize(num_samples, sample_rate, rng)
    }
}

impl Synthesizer for Voice {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        match self {
            Voice::Kick(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::HiHat(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::Snare(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::Clap(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::Percussion(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::Bass(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::SubBass(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::Melody(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::Pad(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::Pluck(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::Arp(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::Supersaw(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::FutureBass(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::ReeseBass(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::PluckBass(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::DubstepBass(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::PitchBendBass(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::Sweep(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::WhiteNoiseRiser(v) => v.synthesize(num_samples, sample_rate, rng),
            Voice::Impact(v) => v.synthesize(num_samples, sample_rate, rng),
        }
    }
}

/// Builds the voice for a track.
///
/// `frequency` is the resolved note for pitched roles and `bend_frequency`
/// the pitch-bend target; both are ignored by drums and FX.
pub fn voice_for(track: &Track, frequency: f64, bend_frequency: f64) -> Voice {
    match track.role {
        InstrumentRole::Kick => Voice::Kick(Kick::new(track.punch())),
        InstrumentRole::Hihat => Voice::HiHat(HiHat::new(track.tone())),
        InstrumentRole::Snare => Voice::Snare(Snare::new(track.tone())),
        InstrumentRole::Clap => Voice::Clap(Clap),
        InstrumentRole::Percussion => Voice::Percussion(Percussion),
        InstrumentRole::Bass => Voice::Bass(Bass { frequency }),
        InstrumentRole::SubBass => Voice::SubBass(SubBass { frequency }),
        InstrumentRole::Melody => Voice::Melody(Melody { frequency }),
        InstrumentRole::Pad => Voice::Pad(Pad { frequency }),
        InstrumentRole::Pluck => Voice::Pluck(Pluck::new(frequency)),
        InstrumentRole::Arp => Voice::Arp(Arp::new(frequency, track.arp_pattern())),
        InstrumentRole::Supersaw => Voice::Supersaw(Supersaw {
            frequency,
            detune: track.detune(),
            voices: track.voices(),
        }),
        InstrumentRole::FutureBass => Voice::FutureBass(FutureBass { frequency }),
        InstrumentRole::ReeseBass => Voice::ReeseBass(ReeseBass { frequency }),
        InstrumentRole::PluckBass => Voice::PluckBass(PluckBass { frequency }),
        InstrumentRole::DubstepBass => Voice::DubstepBass(DubstepBass {
            frequency,
            wobble_rate: track.wobble_rate(),
        }),
        InstrumentRole::PitchBendBass => Voice::PitchBendBass(PitchBendBass {
            start_freq: frequency,
            end_freq: bend_frequency,
            style: BassStyle::from_name(track.bass_style()),
        }),
        InstrumentRole::Sweep => Voice::Sweep(Sweep {
            start_freq: track.start_freq(),
            end_freq: track.end_freq(),
            reverse: track.reverse,
        }),
        InstrumentRole::WhiteNoiseRiser => Voice::WhiteNoiseRiser(WhiteNoiseRiser),
        InstrumentRole::Impact => Voice::Impact(Impact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use dropforge_spec::RoleCategory;

    const SR: f64 = 44100.0;

    fn track(role: InstrumentRole) -> Track {
        Track::new(role)
    }

    #[test]
    fn test_every_role_renders_requested_length() {
        for role in InstrumentRole::ALL {
            let voice = voice_for(&track(role), 220.0, 330.0);
            for duration in [0.1, 0.25, 0.3337] {
                let out = voice.render(duration, SR, &mut create_rng(1));
                assert_eq!(
                    out.len(),
                    (duration * SR).round() as usize,
                    "{} at {}s",
                    role,
                    duration
                );
            }
        }
    }

    #[test]
    fn test_zero_duration_is_empty() {
        for role in InstrumentRole::ALL {
            let voice = voice_for(&track(role), 220.0, 330.0);
            assert!(voice.render(0.0, SR, &mut create_rng(1)).is_empty(), "{}", role);
            assert!(voice.render(-1.0, SR, &mut create_rng(1)).is_empty(), "{}", role);
        }
    }

    #[test]
    fn test_pitched_roles_are_silent_at_zero_hz() {
        for role in InstrumentRole::ALL {
            if role.category() != RoleCategory::Melodic {
                continue;
            }
            let out = voice_for(&track(role), 0.0, 0.0).render(0.2, SR, &mut create_rng(1));
            assert_eq!(out.len(), 8820);
            assert!(out.iter().all(|&s| s == 0.0), "{}", role);
        }
    }

    #[test]
    fn test_voices_stay_in_range() {
        for role in InstrumentRole::ALL {
            let out = voice_for(&track(role), 110.0, 55.0).render(0.5, SR, &mut create_rng(3));
            let peak = out.iter().fold(0.0_f64, |a, s| a.max(s.abs()));
            assert!(peak <= 1.5, "{} peaked at {}", role, peak);
        }
    }

    #[test]
    fn test_track_parameters_reach_the_voice() {
        let mut t = track(InstrumentRole::Supersaw);
        t.voices = Some(3);
        t.detune = Some(0.1);
        match voice_for(&t, 440.0, 0.0) {
            Voice::Supersaw(saw) => {
                assert_eq!(saw.voices, 3);
                assert_eq!(saw.detune, 0.1);
                assert_eq!(saw.frequency, 440.0);
            }
            other => panic!("unexpected voice {:?}", other),
        }

        let mut t = track(InstrumentRole::PitchBendBass);
        t.bass_style = Some("reese".to_string());
        match voice_for(&t, 55.0, 110.0) {
            Voice::PitchBendBass(bend) => {
                assert_eq!(bend.style, BassStyle::Reese);
                assert_eq!(bend.end_freq, 110.0);
            }
            other => panic!("unexpected voice {:?}", other),
        }
    }
}
