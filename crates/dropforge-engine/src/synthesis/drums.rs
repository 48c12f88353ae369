//! Drum voices: kick, hi-hat, snare, clap, and percussion.
//!
//! Hits are short, fixed-length renders. Everything except the kick is built
//! from filtered noise, so they all draw from the track RNG.

use rand_pcg::Pcg32;

use crate::envelope::{apply_envelope, AdsrParams};
use crate::filter::apply_highpass;
use crate::oscillator::{self, PhaseAccumulator, TWO_PI};

use super::Synthesizer;

/// Kick drum: a fast exponential pitch drop with a click and a sub tail.
#[derive(Debug, Clone)]
pub struct Kick {
    /// Depth of the pitch drop (1.0 = 200 Hz above the 60 Hz body).
    pub punch: f64,
}

impl Kick {
    pub fn new(punch: f64) -> Self {
        Self { punch }
    }
}

impl Synthesizer for Kick {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        let mut phase_acc = PhaseAccumulator::new(sample_rate);
        let mut output: Vec<f64> = (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                let freq = 60.0 + 200.0 * self.punch * (-t / 0.05).exp();
                let body = oscillator::sine(phase_acc.advance(freq));
                let click = (TWO_PI * 150.0 * t).sin() * (-t / 0.002).exp();
                let sub = (TWO_PI * 50.0 * t).sin() * (-t / 0.15).exp();
                (body + click * 0.3) * 0.7 + sub * 0.3
            })
            .collect();

        apply_envelope(
            &mut output,
            sample_rate,
            &AdsrParams::new(0.002, 0.2, 0.1, 0.1).with_curve(2.0),
        );

        // Soft saturation
        output.iter().map(|s| (s * 1.2).tanh() * 0.9).collect()
    }
}

/// Hi-hat: noise blended with an 8 kHz metallic partial, high-passed.
#[derive(Debug, Clone)]
pub struct HiHat {
    /// Balance between noise (0.0) and the metallic partial (1.0).
    pub tone: f64,
}

impl HiHat {
    pub fn new(tone: f64) -> Self {
        Self { tone }
    }
}

impl Synthesizer for HiHat {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let noise = oscillator::white_noise(rng, num_samples);
        let mut output: Vec<f64> = noise
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let metallic = (TWO_PI * 8000.0 * i as f64 / sample_rate).sin() * self.tone;
                n * (1.0 - self.tone) + metallic
            })
            .collect();

        apply_highpass(&mut output, 4000.0, sample_rate);
        apply_envelope(
            &mut output,
            sample_rate,
            &AdsrParams::new(0.002, 0.03, 0.0, 0.02),
        );

        output.iter().map(|s| s * 0.3).collect()
    }
}

/// Snare: two tonal partials under high-passed noise.
#[derive(Debug, Clone)]
pub struct Snare {
    /// Level of the 200/300 Hz body partials.
    pub tone: f64,
}

impl Snare {
    pub fn new(tone: f64) -> Self {
        Self { tone }
    }
}

impl Synthesizer for Snare {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let mut noise = oscillator::white_noise(rng, num_samples);
        apply_highpass(&mut noise, 200.0, sample_rate);

        let mut output: Vec<f64> = noise
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let t = i as f64 / sample_rate;
                let tones =
                    ((TWO_PI * 200.0 * t).sin() + (TWO_PI * 300.0 * t).sin() * 0.7) * self.tone;
                tones * 0.4 + n * 0.6
            })
            .collect();

        apply_envelope(
            &mut output,
            sample_rate,
            &AdsrParams::new(0.002, 0.03, 0.0, 0.05),
        );

        output.iter().map(|s| s.tanh() * 0.6).collect()
    }
}

/// Clap: a train of short noise bursts with rising level.
#[derive(Debug, Clone, Default)]
pub struct Clap;

impl Clap {
    const BURSTS: usize = 4;
    const SPACING: f64 = 0.008;
    const BURST_LENGTH: f64 = 0.008;
}

impl Synthesizer for Clap {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let mut output = vec![0.0; num_samples];
        let burst_len = (Self::BURST_LENGTH * sample_rate) as usize;

        for burst in 0..Self::BURSTS {
            let start = (burst as f64 * Self::SPACING * sample_rate) as usize;
            if start >= num_samples {
                break;
            }
            let len = burst_len.min(num_samples - start);
            let gain = 0.7 + burst as f64 * 0.1;
            let noise = oscillator::white_noise(rng, len);
            for (dst, n) in output[start..start + len].iter_mut().zip(noise) {
                *dst = n * gain;
            }
        }

        apply_highpass(&mut output, 1000.0, sample_rate);
        apply_envelope(
            &mut output,
            sample_rate,
            &AdsrParams::new(0.001, 0.02, 0.0, 0.04),
        );

        output.iter().map(|s| s * 0.5).collect()
    }
}

/// Percussion: three inharmonic partials with a noise transient.
#[derive(Debug, Clone, Default)]
pub struct Percussion;

impl Synthesizer for Percussion {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        let mut output: Vec<f64> = (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                (TWO_PI * 800.0 * t).sin() * 0.5
                    + (TWO_PI * 1200.0 * t).sin() * 0.3
                    + (TWO_PI * 2000.0 * t).sin() * 0.2
            })
            .collect();

        let transient_len = ((0.002 * sample_rate) as usize).min(num_samples);
        let transient = oscillator::white_noise(rng, transient_len);
        for (dst, n) in output.iter_mut().zip(transient) {
            *dst += n * 0.5;
        }

        apply_envelope(
            &mut output,
            sample_rate,
            &AdsrParams::new(0.001, 0.02, 0.0, 0.01),
        );

        output.iter().map(|s| s * 0.4).collect()
    }
}
