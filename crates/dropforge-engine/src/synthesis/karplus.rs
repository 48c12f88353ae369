//! Karplus-Strong plucked string.
//!
//! A noise-seeded ring buffer one period long is read out sample by sample;
//! each read slot is replaced by the damped average of itself and its
//! neighbour. The feedback makes this strictly sequential.

use rand_pcg::Pcg32;

use crate::envelope::{apply_envelope, AdsrParams};
use crate::oscillator;

use super::{silence, Synthesizer};

/// Karplus-Strong pluck parameters.
#[derive(Debug, Clone)]
pub struct Pluck {
    /// Base frequency in Hz.
    pub frequency: f64,
    /// Feedback damping per pass.
    pub decay: f64,
}

impl Pluck {
    /// Default damping factor.
    pub const DEFAULT_DECAY: f64 = 0.996;

    pub fn new(frequency: f64) -> Self {
        Self {
            frequency,
            decay: Self::DEFAULT_DECAY,
        }
    }
}

impl Synthesizer for Pluck {
    fn synthesize(&self, num_samples: usize, sample_rate: f64, rng: &mut Pcg32) -> Vec<f64> {
        if self.frequency <= 0.0 {
            return silence(num_samples);
        }

        let period = ((sample_rate / self.frequency) as usize).max(1);
        let mut ring = oscillator::white_noise(rng, period);
        let mut output = Vec::with_capacity(num_samples);

        for i in 0..num_samples {
            let idx = i % period;
            let next = (i + 1) % period;
            output.push(ring[idx]);
            ring[idx] = self.decay * 0.5 * (ring[idx] + ring[next]);
        }

        apply_envelope(&mut output, sample_rate, &AdsrParams::new(0.001, 0.1, 0.3, 0.2));
        output.iter().map(|s| s * 0.6).collect()
    }
}
