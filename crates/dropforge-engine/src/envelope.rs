//! ADSR envelope shaping.
//!
//! Envelopes are computed for a whole buffer at once. Segment lengths are
//! measured in samples and clamped in attack, decay, release order so the three
//! windows never overlap or exceed the buffer; whatever remains between decay
//! and release holds the sustain level.

use crate::oscillator::linspace;

/// ADSR envelope parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrParams {
    /// Attack time in seconds.
    pub attack: f64,
    /// Decay time in seconds.
    pub decay: f64,
    /// Sustain level (0.0 to 1.0).
    pub sustain: f64,
    /// Release time in seconds.
    pub release: f64,
    /// Shaping exponent applied to every segment ramp.
    pub curve: f64,
}

impl Default for AdsrParams {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.1,
            sustain: 0.5,
            release: 0.1,
            curve: 1.0,
        }
    }
}

impl AdsrParams {
    /// Creates new ADSR parameters with a linear curve.
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(0.0),
            curve: 1.0,
        }
    }

    /// Sets the shaping exponent.
    pub fn with_curve(mut self, curve: f64) -> Self {
        self.curve = curve.max(0.0);
        self
    }

    /// Segment lengths in samples as `(attack, decay, release)`.
    pub fn segment_lengths(&self, num_samples: usize, sample_rate: f64) -> (usize, usize, usize) {
        let to_samples = |seconds: f64| (seconds * sample_rate).max(0.0) as usize;
        let attack = to_samples(self.attack).min(num_samples);
        let decay = to_samples(self.decay).min(num_samples - attack);
        let release = to_samples(self.release).min(num_samples - attack - decay);
        (attack, decay, release)
    }

    /// Computes the gain curve for a buffer of `num_samples`.
    pub fn curve(&self, num_samples: usize, sample_rate: f64) -> Vec<f64> {
        let (attack, decay, release) = self.segment_lengths(num_samples, sample_rate);
        let mut env = Vec::with_capacity(num_samples);

        env.extend(
            linspace(0.0, 1.0, attack)
                .into_iter()
                .map(|x| x.powf(self.curve)),
        );
        env.extend(
            linspace(0.0, 1.0, decay)
                .into_iter()
                .map(|x| 1.0 - x.powf(self.curve) * (1.0 - self.sustain)),
        );
        let hold = num_samples - attack - decay - release;
        env.extend(std::iter::repeat(self.sustain).take(hold));
        env.extend(
            linspace(0.0, 1.0, release)
                .into_iter()
                .map(|x| self.sustain * (1.0 - x.powf(self.curve))),
        );

        env
    }
}

/// Multiplies an ADSR envelope into a buffer in place.
pub fn apply_envelope(samples: &mut [f64], sample_rate: f64, params: &AdsrParams) {
    if samples.is_empty() {
        return;
    }
    let env = params.curve(samples.len(), sample_rate);
    for (sample, gain) in samples.iter_mut().zip(env) {
        *sample *= gain;
    }
}
