//! Supersaw lead: a stack of detuned, phase-scattered saws.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::envelope::{apply_envelope, AdsrParams};
use crate::filter::{apply_lowpass, Cutoff};
use crate::oscillator::{self, TWO_PI};

use super::{silence, Synthesizer};

/// Supersaw parameters.
#[derive(Debug, Clone)]
pub struct Supersaw {
    /// Base frequency in Hz.
    pub frequency: f64,
    /// Total detune spread as a fraction of the base frequency.
    pub detune: f64,
    /// Number of saw oscillators.
    pub voices: u32,
}

impl Supersaw {
    /// Detune multiplier for oscillator `index`, centred on the middle voice.
    pub fn detune_factor(&self, index: u32) -> f64 {
        let offset = index as f64 - (self.voices / 2) as f64;
        1.0 + offset * self.detune / self.voices as f64
    }
}

impl Synthesizer for Supersaw {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        if self.frequency <= 0.0 || self.voices == 0 || num_samples == 0 {
            return silence(num_samples);
        }

        let mut output = silence(num_samples);
        let gain = 1.0 / self.voices as f64;

        for index in 0..self.voices {
            let freq = self.frequency * self.detune_factor(index);
            // Random start phase, applied as a circular shift of the voice
            let phase_shift = rng.gen::<f64>() * TWO_PI;
            let shift = (phase_shift * sample_rate / (TWO_PI * self.frequency)) as usize;
            let shift = shift % num_samples;

            for (i, sample) in output.iter_mut().enumerate() {
                let src = (i + num_samples - shift) % num_samples;
                *sample += oscillator::saw(freq * src as f64 / sample_rate) * gain;
            }
        }

        let mut cutoff = Vec::with_capacity(num_samples);
        for (i, sample) in output.iter_mut().enumerate() {
            let t = i as f64 / sample_rate;
            // Subtle pulse-width style amplitude modulation
            *sample *= 1.0 + (TWO_PI * 3.0 * t).sin() * 0.02;
            cutoff.push(4000.0 + 2000.0 * (TWO_PI * 0.5 * t).sin());
        }

        apply_lowpass(&mut output, Cutoff::Sweep(&cutoff), sample_rate, 1.5);
        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.02, 0.1, 0.7, 0.2));
        output.iter().map(|s| s * 0.4).collect()
    }
}
