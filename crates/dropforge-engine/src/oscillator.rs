//! Waveform primitives, noise, and time axes.
//!
//! Oscillators take either a phase in radians (`sine`, `square`) or a phase in
//! cycles (`saw`), so callers can drive them from a constant frequency or an
//! integrated frequency curve.

use rand::Rng;
use rand_pcg::Pcg32;

/// 2π.
pub const TWO_PI: f64 = std::f64::consts::PI * 2.0;

/// Number of samples for a duration in seconds.
///
/// Non-positive or non-finite durations give an empty buffer.
pub fn sample_count(duration: f64, sample_rate: f64) -> usize {
    if !(duration > 0.0) || !duration.is_finite() || !(sample_rate > 0.0) {
        return 0;
    }
    (duration * sample_rate).round() as usize
}

/// Sample times in seconds: `i / sample_rate` for `i` in `0..num_samples`.
pub fn time_axis(num_samples: usize, sample_rate: f64) -> Vec<f64> {
    (0..num_samples).map(|i| i as f64 / sample_rate).collect()
}

/// `num` evenly spaced values from `start` to `end` inclusive.
///
/// A single value is `start`; zero values is empty.
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Sine of a phase in radians.
#[inline]
pub fn sine(phase: f64) -> f64 {
    phase.sin()
}

/// Sign of the sine of a phase in radians: +1, -1, or 0 on a zero crossing.
#[inline]
pub fn square(phase: f64) -> f64 {
    let s = phase.sin();
    if s > 0.0 {
        1.0
    } else if s < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Naive sawtooth in [-1, 1) of a phase in cycles.
#[inline]
pub fn saw(cycles: f64) -> f64 {
    2.0 * (cycles - (0.5 + cycles).floor())
}

/// Uniform white noise in [-1, 1).
pub fn white_noise(rng: &mut Pcg32, num_samples: usize) -> Vec<f64> {
    (0..num_samples).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// Running phase integrator.
///
/// Each call adds `2π · freq / sample_rate` and returns the accumulated
/// phase, so the first sample already includes one step.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: f64,
    sample_rate: f64,
}

impl PhaseAccumulator {
    /// Creates an accumulator starting at phase 0.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
        }
    }

    /// Advances by one sample at `freq` Hz and returns the new phase.
    #[inline]
    pub fn advance(&mut self, freq: f64) -> f64 {
        self.phase += TWO_PI * freq / self.sample_rate;
        self.phase
    }

    /// Integrates a whole frequency curve into phases.
    pub fn integrate(freqs: &[f64], sample_rate: f64) -> Vec<f64> {
        let mut acc = Self::new(sample_rate);
        freqs.iter().map(|&f| acc.advance(f)).collect()
    }
}
