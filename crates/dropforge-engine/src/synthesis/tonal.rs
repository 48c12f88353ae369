//! Basic pitched voices: bass, sub bass, melody, pad, and arpeggio.

use rand_pcg::Pcg32;

use crate::envelope::{apply_envelope, AdsrParams};
use crate::oscillator::{self, TWO_PI};

use super::{silence, Synthesizer};

/// Sine bass.
#[derive(Debug, Clone)]
pub struct Bass {
    pub frequency: f64,
}

impl Synthesizer for Bass {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        if self.frequency <= 0.0 {
            return silence(num_samples);
        }
        let mut output: Vec<f64> = (0..num_samples)
            .map(|i| (TWO_PI * self.frequency * i as f64 / sample_rate).sin())
            .collect();
        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.01, 0.1, 0.6, 0.1));
        output.iter().map(|s| s * 0.7).collect()
    }
}

/// Sine sub bass with a touch of second harmonic.
#[derive(Debug, Clone)]
pub struct SubBass {
    pub frequency: f64,
}

impl Synthesizer for SubBass {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        if self.frequency <= 0.0 {
            return silence(num_samples);
        }
        let mut output: Vec<f64> = (0..num_samples)
            .map(|i| {
                let w = TWO_PI * self.frequency * i as f64 / sample_rate;
                w.sin() * 0.8 + (2.0 * w).sin() * 0.2
            })
            .collect();
        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.01, 0.05, 0.8, 0.1));
        output.iter().map(|s| s * 0.8).collect()
    }
}

/// Sawtooth lead.
#[derive(Debug, Clone)]
pub struct Melody {
    pub frequency: f64,
}

impl Synthesizer for Melody {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        if self.frequency <= 0.0 {
            return silence(num_samples);
        }
        let mut output: Vec<f64> = (0..num_samples)
            .map(|i| oscillator::saw(self.frequency * i as f64 / sample_rate))
            .collect();
        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.05, 0.2, 0.4, 0.2));
        output.iter().map(|s| s * 0.5).collect()
    }
}

/// Slow-attack pad of four detuned and octave sines.
#[derive(Debug, Clone)]
pub struct Pad {
    pub frequency: f64,
}

impl Pad {
    /// `(frequency ratio, level)` for each partial.
    const PARTIALS: [(f64, f64); 4] = [(1.0, 1.0), (1.01, 0.7), (2.0, 0.3), (0.5, 0.4)];
    const NORMALIZATION: f64 = 2.4;
}

impl Synthesizer for Pad {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        if self.frequency <= 0.0 {
            return silence(num_samples);
        }
        let mut output: Vec<f64> = (0..num_samples)
            .map(|i| {
                let w = TWO_PI * self.frequency * i as f64 / sample_rate;
                Self::PARTIALS
                    .iter()
                    .map(|(ratio, level)| (w * ratio).sin() * level)
                    .sum::<f64>()
                    / Self::NORMALIZATION
            })
            .collect();
        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.3, 0.2, 0.6, 0.3));
        output.iter().map(|s| s * 0.3).collect()
    }
}

/// Arpeggio: the note is split into equal slices, one per pattern step, each
/// playing a saw/square mix at `frequency × multiplier`.
#[derive(Debug, Clone)]
pub struct Arp {
    pub frequency: f64,
    /// Frequency multipliers, cycled once across the note.
    pub pattern: Vec<f64>,
}

impl Arp {
    pub fn new(frequency: f64, pattern: &[f64]) -> Self {
        let pattern = if pattern.is_empty() {
            dropforge_spec::score::DEFAULT_ARP_PATTERN.to_vec()
        } else {
            pattern.to_vec()
        };
        Self { frequency, pattern }
    }
}

impl Synthesizer for Arp {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, _rng: &mut Pcg32) -> Vec<f64> {
        if self.frequency <= 0.0 || self.pattern.is_empty() {
            return silence(num_samples);
        }

        let mut output = silence(num_samples);
        let steps = self.pattern.len();
        let boundary = |step: usize| (step * num_samples) / steps;

        for (step, multiplier) in self.pattern.iter().enumerate() {
            let freq = self.frequency * multiplier;
            let (start, end) = (boundary(step), boundary(step + 1));
            for (j, sample) in output[start..end].iter_mut().enumerate() {
                let t = j as f64 / sample_rate;
                *sample = 0.6 * oscillator::saw(freq * t) + 0.4 * oscillator::square(TWO_PI * freq * t);
            }
        }

        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.01, 0.05, 0.4, 0.1));
        output.iter().map(|s| s * 0.4).collect()
    }
}
