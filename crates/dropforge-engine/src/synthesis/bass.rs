//! Modern bass voices: future bass, reese, pluck bass, dubstep wobble, and
//! pitch-bend bass.
//!
//! These stack detuned oscillators over a sub-octave sine and shape them with
//! a moving low-pass cutoff.

use rand_pcg::Pcg32;

use crate::envelope::{apply_envelope, AdsrParams};
use crate::filter::{apply_lowpass, Cutoff};
use crate::oscillator::{self, linspace, PhaseAccumulator, TWO_PI};

use super::{silence, Synthesizer};

/// Future bass: two detuned saws and a sub sine under a 4 Hz filter wobble.
#[derive(Debug, Clone)]
pub struct FutureBass {
    pub frequency: f64,
}

impl FutureBass {
    const WOBBLE_RATE: f64 = 4.0;
}

impl Synthesizer for FutureBass {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        if self.frequency <= 0.0 {
            return silence(num_samples);
        }
        let f = self.frequency;
        let mut cutoff = Vec::with_capacity(num_samples);
        let mut output: Vec<f64> = (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                cutoff.push(1000.0 + 3000.0 * (1.0 + (TWO_PI * Self::WOBBLE_RATE * t).sin()));
                let saws = oscillator::saw(f * t) + oscillator::saw(f * 1.01 * t) * 0.8;
                saws * 0.4 + (TWO_PI * f * 0.5 * t).sin() * 0.3
            })
            .collect();

        apply_lowpass(&mut output, Cutoff::Sweep(&cutoff), sample_rate, 2.0);
        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.01, 0.05, 0.6, 0.1));
        output.iter().map(|s| s * 0.5).collect()
    }
}

/// Reese bass: two saws 0.7 % apart, phasing against each other.
#[derive(Debug, Clone)]
pub struct ReeseBass {
    pub frequency: f64,
}

impl Synthesizer for ReeseBass {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        if self.frequency <= 0.0 {
            return silence(num_samples);
        }
        let f = self.frequency;
        let mut output: Vec<f64> = (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                let saws = (oscillator::saw(f * t) + oscillator::saw(f * 1.007 * t)) * 0.5;
                saws * 0.7 + (TWO_PI * f * 0.5 * t).sin() * 0.3
            })
            .collect();

        apply_lowpass(&mut output, Cutoff::Fixed(400.0), sample_rate, 1.2);
        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.01, 0.1, 0.8, 0.1));
        output.iter().map(|s| s * 0.7).collect()
    }
}

/// Pluck bass: saw/square mix with a fast envelope and a falling filter.
#[derive(Debug, Clone)]
pub struct PluckBass {
    pub frequency: f64,
}

impl Synthesizer for PluckBass {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        if self.frequency <= 0.0 {
            return silence(num_samples);
        }
        let f = self.frequency;
        let mut cutoff = Vec::with_capacity(num_samples);
        let mut output: Vec<f64> = (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                cutoff.push(3000.0 * (-t / 0.1).exp() + 200.0);
                let body =
                    oscillator::saw(f * t) * 0.6 + oscillator::square(TWO_PI * f * t) * 0.4;
                body * 0.7 + (TWO_PI * f * 0.5 * t).sin() * 0.3
            })
            .collect();

        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.001, 0.15, 0.2, 0.1));
        apply_lowpass(&mut output, Cutoff::Sweep(&cutoff), sample_rate, 1.5);
        output.iter().map(|s| s * 0.8).collect()
    }
}

/// Dubstep bass: harmonic-rich sine with an LFO on both cutoff and level.
#[derive(Debug, Clone)]
pub struct DubstepBass {
    pub frequency: f64,
    /// LFO rate in Hz.
    pub wobble_rate: f64,
}

impl Synthesizer for DubstepBass {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        if self.frequency <= 0.0 {
            return silence(num_samples);
        }
        let f = self.frequency;
        let lfo: Vec<f64> = (0..num_samples)
            .map(|i| (1.0 + (TWO_PI * self.wobble_rate * i as f64 / sample_rate).sin()) * 0.5)
            .collect();
        let cutoff: Vec<f64> = lfo.iter().map(|l| 100.0 + 500.0 * l).collect();

        let mut output: Vec<f64> = (0..num_samples)
            .map(|i| {
                let w = TWO_PI * f * i as f64 / sample_rate;
                w.sin() + (2.0 * w).sin() * 0.3 + (3.0 * w).sin() * 0.15
            })
            .collect();

        apply_lowpass(&mut output, Cutoff::Sweep(&cutoff), sample_rate, 2.0);
        for (sample, l) in output.iter_mut().zip(&lfo) {
            *sample *= 0.3 + 0.7 * l;
        }
        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.01, 0.05, 0.9, 0.05));
        output.iter().map(|s| s * 0.8).collect()
    }
}

/// Synthesis style used by [`PitchBendBass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BassStyle {
    /// Sine plus square with a plucky envelope.
    Pluck,
    /// Two detuned saws through a 400 Hz low-pass.
    Reese,
    /// Plain sine.
    Sine,
}

impl BassStyle {
    /// Maps a style name; unknown names fall back to [`BassStyle::Sine`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "pluck" => BassStyle::Pluck,
            "reese" => BassStyle::Reese,
            _ => BassStyle::Sine,
        }
    }
}

/// Bass that glides exponentially from one pitch to another over the note.
///
/// The oscillator phase is integrated from the instantaneous frequency, so
/// the glide is click-free.
#[derive(Debug, Clone)]
pub struct PitchBendBass {
    pub start_freq: f64,
    pub end_freq: f64,
    pub style: BassStyle,
}

impl PitchBendBass {
    /// Instantaneous frequency for every sample.
    pub fn frequency_curve(&self, num_samples: usize) -> Vec<f64> {
        let (start, end) = (self.start_freq, self.end_freq);
        match (start > 0.0, end > 0.0) {
            (true, true) => linspace(0.0, 1.0, num_samples)
                .into_iter()
                .map(|p| start * (end / start).powf(p))
                .collect(),
            (true, false) => vec![start; num_samples],
            (false, true) => vec![end; num_samples],
            (false, false) => vec![0.0; num_samples],
        }
    }
}

impl Synthesizer for PitchBendBass {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        if self.start_freq <= 0.0 && self.end_freq <= 0.0 {
            return silence(num_samples);
        }

        let freqs = self.frequency_curve(num_samples);
        let phases = PhaseAccumulator::integrate(&freqs, sample_rate);

        let mut output: Vec<f64> = match self.style {
            BassStyle::Pluck => phases
                .iter()
                .map(|&p| oscillator::sine(p) * 0.5 + oscillator::square(p) * 0.5)
                .collect(),
            BassStyle::Reese => {
                let detuned: Vec<f64> = freqs.iter().map(|f| f * 1.007).collect();
                let phases2 = PhaseAccumulator::integrate(&detuned, sample_rate);
                phases
                    .iter()
                    .zip(&phases2)
                    .map(|(p1, p2)| {
                        (oscillator::saw(p1 / TWO_PI) + oscillator::saw(p2 / TWO_PI)) * 0.5
                    })
                    .collect()
            }
            BassStyle::Sine => phases.iter().map(|&p| oscillator::sine(p)).collect(),
        };

        let envelope = match self.style {
            BassStyle::Pluck => AdsrParams::new(0.001, 0.15, 0.2, 0.1),
            BassStyle::Reese => {
                apply_lowpass(&mut output, Cutoff::Fixed(400.0), sample_rate, 1.0);
                AdsrParams::new(0.01, 0.1, 0.8, 0.1)
            }
            BassStyle::Sine => AdsrParams::new(0.01, 0.1, 0.7, 0.1),
        };
        apply_envelope(&mut output, sample_rate, &envelope);

        output.iter().map(|s| s * 0.7).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    const SR: f64 = 44100.0;

    fn voices(freq: f64) -> Vec<Box<dyn Synthesizer>> {
        vec![
            Box::new(FutureBass { frequency: freq }),
            Box::new(ReeseBass { frequency: freq }),
            Box::new(PluckBass { frequency: freq }),
            Box::new(DubstepBass {
                frequency: freq,
                wobble_rate: 2.0,
            }),
            Box::new(PitchBendBass {
                start_freq: freq,
                end_freq: freq * 2.0,
                style: BassStyle::Pluck,
            }),
        ]
    }

    #[test]
    fn test_zero_frequency_is_silent() {
        for voice in voices(0.0) {
            let out = voice.synthesize(2000, SR, &mut create_rng(0));
            assert_eq!(out.len(), 2000);
            assert!(out.iter().all(|&s| s == 0.0));
        }
    }

    #[test]
    fn test_outputs_are_bounded() {
        for voice in voices(55.0) {
            let out = voice.synthesize(22050, SR, &mut create_rng(0));
            let peak = out.iter().fold(0.0_f64, |a, s| a.max(s.abs()));
            assert!(peak > 0.0 && peak <= 1.2, "peak {}", peak);
        }
    }

    #[test]
    fn test_bend_curve_is_exponential() {
        let bend = PitchBendBass {
            start_freq: 100.0,
            end_freq: 400.0,
            style: BassStyle::Sine,
        };
        let curve = bend.frequency_curve(3);
        assert!((curve[0] - 100.0).abs() < 1e-9);
        assert!((curve[1] - 200.0).abs() < 1e-9);
        assert!((curve[2] - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_bend_to_rest_holds_start_pitch() {
        let bend = PitchBendBass {
            start_freq: 110.0,
            end_freq: 0.0,
            style: BassStyle::Reese,
        };
        assert_eq!(bend.frequency_curve(4), vec![110.0; 4]);
        let out = bend.synthesize(4410, SR, &mut create_rng(0));
        assert!(out.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_bass_style_names() {
        assert_eq!(BassStyle::from_name("pluck"), BassStyle::Pluck);
        assert_eq!(BassStyle::from_name("reese"), BassStyle::Reese);
        assert_eq!(BassStyle::from_name("sine"), BassStyle::Sine);
        assert_eq!(BassStyle::from_name("growl"), BassStyle::Sine);
    }
}
