//! Transition effects: frequency sweep, white-noise riser, and impact.

use rand_pcg::Pcg32;

use crate::envelope::{apply_envelope, AdsrParams};
use crate::filter::{apply_highpass, apply_lowpass, Cutoff};
use crate::oscillator::{self, linspace, PhaseAccumulator, TWO_PI};

use super::Synthesizer;

/// Sine glide between two frequencies, fading in over the section.
///
/// When reversed both the glide and the fade run backwards.
#[derive(Debug, Clone)]
pub struct Sweep {
    pub start_freq: f64,
    pub end_freq: f64,
    pub reverse: bool,
}

impl Synthesizer for Sweep {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let (from, to) = if self.reverse {
            (self.end_freq, self.start_freq)
        } else {
            (self.start_freq, self.end_freq)
        };
        let freqs = linspace(from, to, num_samples);
        let phases = PhaseAccumulator::integrate(&freqs, sample_rate);
        let shape = if self.reverse {
            linspace(1.0, 0.0, num_samples)
        } else {
            linspace(0.0, 1.0, num_samples)
        };

        phases
            .iter()
            .zip(&shape)
            .map(|(&p, s)| oscillator::sine(p) * s * 0.3)
            .collect()
    }
}

/// Noise with a quadratically opening low-pass and a quadratic swell.
#[derive(Debug, Clone, Default)]
pub struct WhiteNoiseRiser;

impl Synthesizer for WhiteNoiseRiser {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let progress = linspace(0.0, 1.0, num_samples);
        let cutoff: Vec<f64> = progress.iter().map(|p| 200.0 + 8000.0 * p * p).collect();

        let mut output = oscillator::white_noise(rng, num_samples);
        apply_lowpass(&mut output, Cutoff::Sweep(&cutoff), sample_rate, 1.0);

        output
            .iter()
            .zip(&progress)
            .map(|(s, p)| s * p * p * 0.3)
            .collect()
    }
}

/// Drop impact: a decaying 40 Hz boom under a high-passed noise crash.
#[derive(Debug, Clone, Default)]
pub struct Impact;

impl Synthesizer for Impact {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let mut crash = oscillator::white_noise(rng, num_samples);
        apply_highpass(&mut crash, 2000.0, sample_rate);

        let mut output: Vec<f64> = crash
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let t = i as f64 / sample_rate;
                let boom = (TWO_PI * 40.0 * t).sin() * (-t / 0.3).exp();
                boom * 0.6 + c * 0.4
            })
            .collect();

        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.001, 0.5, 0.3, 0.5));
        output.iter().map(|s| s * 0.7).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    const SR: f64 = 44100.0;

    #[test]
    fn test_sweep_fades_in() {
        let sweep = Sweep {
            start_freq: 100.0,
            end_freq: 8000.0,
            reverse: false,
        };
        let out = sweep.synthesize(44100, SR, &mut create_rng(0));
        assert_eq!(out[0], 0.0);
        let peak = |s: &[f64]| s.iter().fold(0.0_f64, |a, v| a.max(v.abs()));
        assert!(peak(&out[..4410]) < peak(&out[39690..]));
        assert!(peak(&out) <= 0.3);
    }

    #[test]
    fn test_reverse_sweep_fades_out() {
        let sweep = Sweep {
            start_freq: 100.0,
            end_freq: 8000.0,
            reverse: true,
        };
        let out = sweep.synthesize(1000, SR, &mut create_rng(0));
        assert_eq!(out[999], 0.0);
    }

    #[test]
    fn test_riser_grows() {
        let out = WhiteNoiseRiser.synthesize(44100, SR, &mut create_rng(4));
        let energy = |s: &[f64]| s.iter().map(|v| v * v).sum::<f64>();
        assert!(energy(&out[..11025]) < energy(&out[33075..]));
        assert_eq!(out[0], 0.0);
    }

    #[test]
    fn test_impact_is_bounded_and_seeded() {
        let a = Impact.synthesize(88200, SR, &mut create_rng(6));
        let b = Impact.synthesize(88200, SR, &mut create_rng(6));
        assert_eq!(a, b);
        assert!(a.iter().all(|s| s.abs() <= 1.0));
        assert!(a.iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_empty_buffers() {
        let mut rng = create_rng(0);
        assert!(Impact.synthesize(0, SR, &mut rng).is_empty());
        assert!(WhiteNoiseRiser.synthesize(0, SR, &mut rng).is_empty());
    }
}
