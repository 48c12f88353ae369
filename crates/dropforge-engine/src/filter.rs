//! Biquad filter stage.
//!
//! Low-pass and high-pass filters are second-order Butterworth sections built
//! from the Audio EQ Cookbook formulas with Q = 1/√2. Cutoffs are normalized
//! against Nyquist and clamped below 0.99 × Nyquist.
//!
//! A time-varying low-pass cutoff is approximated: the filter is designed once
//! at the median of the cutoff curve, and the curve (scaled by its maximum) is
//! then applied to the output as an amplitude envelope.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Q of a second-order Butterworth section.
pub const BUTTERWORTH_Q: f64 = FRAC_1_SQRT_2;

/// Upper bound for a cutoff as a fraction of Nyquist.
pub const MAX_NORMALIZED_CUTOFF: f64 = 0.99;

/// Lower bound for a cutoff as a fraction of Nyquist.
const MIN_NORMALIZED_CUTOFF: f64 = 1e-4;

/// Gain of the resonance band-pass per unit of resonance above 1.
const RESONANCE_MIX: f64 = 0.3;

/// Biquad filter coefficients, normalized by a0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Creates lowpass filter coefficients.
    ///
    /// # Arguments
    /// * `cutoff` - Cutoff frequency in Hz
    /// * `q` - Q factor, 0.707 is Butterworth
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn lowpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let (cos_omega, alpha) = Self::omega(cutoff, q, sample_rate);
        Self::normalize(
            (1.0 - cos_omega) / 2.0,
            1.0 - cos_omega,
            (1.0 - cos_omega) / 2.0,
            cos_omega,
            alpha,
        )
    }

    /// Creates highpass filter coefficients.
    pub fn highpass(cutoff: f64, q: f64, sample_rate: f64) -> Self {
        let (cos_omega, alpha) = Self::omega(cutoff, q, sample_rate);
        Self::normalize(
            (1.0 + cos_omega) / 2.0,
            -(1.0 + cos_omega),
            (1.0 + cos_omega) / 2.0,
            cos_omega,
            alpha,
        )
    }

    /// Creates bandpass filter coefficients (constant skirt gain).
    ///
    /// # Arguments
    /// * `center` - Center frequency in Hz
    /// * `q` - Q factor (bandwidth = center / Q)
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn bandpass(center: f64, q: f64, sample_rate: f64) -> Self {
        let (cos_omega, alpha) = Self::omega(center, q, sample_rate);
        Self::normalize(alpha, 0.0, -alpha, cos_omega, alpha)
    }

    fn omega(frequency: f64, q: f64, sample_rate: f64) -> (f64, f64) {
        // Clamp Q to a safe minimum to prevent division by zero
        let q = q.max(0.5);
        let omega = 2.0 * PI * frequency / sample_rate;
        (omega.cos(), omega.sin() / (2.0 * q))
    }

    fn normalize(b0: f64, b1: f64, b2: f64, cos_omega: f64, alpha: f64) -> Self {
        let a0 = 1.0 + alpha;
        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b2 / a0,
            a1: -2.0 * cos_omega / a0,
            a2: (1.0 - alpha) / a0,
        }
    }
}

/// Biquad filter state (direct form I).
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    /// Creates a new biquad filter with the given coefficients.
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.coeffs.b0 * input + self.coeffs.b1 * self.x1 + self.coeffs.b2 * self.x2
            - self.coeffs.a1 * self.y1
            - self.coeffs.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Processes a buffer of samples in place.
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}

/// Low-pass cutoff: a single frequency or a per-sample sweep, in Hz.
#[derive(Debug, Clone, Copy)]
pub enum Cutoff<'a> {
    Fixed(f64),
    Sweep(&'a [f64]),
}

/// Converts a cutoff in Hz to a clamped fraction of Nyquist.
pub fn normalized_cutoff(cutoff: f64, sample_rate: f64) -> f64 {
    let nyquist = sample_rate / 2.0;
    let normalized = cutoff / nyquist;
    if normalized.is_nan() {
        return MAX_NORMALIZED_CUTOFF;
    }
    normalized.clamp(MIN_NORMALIZED_CUTOFF, MAX_NORMALIZED_CUTOFF)
}

/// Applies a fixed-cutoff high-pass filter in place.
pub fn apply_highpass(samples: &mut [f64], cutoff: f64, sample_rate: f64) {
    let hz = normalized_cutoff(cutoff, sample_rate) * sample_rate / 2.0;
    BiquadFilter::new(BiquadCoeffs::highpass(hz, BUTTERWORTH_Q, sample_rate))
        .process_buffer(samples);
}

/// Applies a low-pass filter in place.
///
/// With a fixed cutoff and `resonance > 1`, a narrow band-pass around the
/// cutoff (±10 %) is mixed back in at `(resonance - 1) × 0.3`. Resonance is
/// ignored for sweeps.
pub fn apply_lowpass(samples: &mut [f64], cutoff: Cutoff<'_>, sample_rate: f64, resonance: f64) {
    if samples.is_empty() {
        return;
    }

    match cutoff {
        Cutoff::Fixed(hz) => {
            let normalized = normalized_cutoff(hz, sample_rate);
            let dry = if resonance > 1.0 {
                Some(samples.to_vec())
            } else {
                None
            };

            lowpass_normalized(samples, normalized, sample_rate);

            if let Some(mut band) = dry {
                if resonance_band(&mut band, normalized, sample_rate) {
                    let mix = (resonance - 1.0) * RESONANCE_MIX;
                    for (sample, resonant) in samples.iter_mut().zip(band) {
                        *sample += resonant * mix;
                    }
                }
            }
        }
        Cutoff::Sweep(curve) => {
            let Some(center) = median(curve) else {
                return;
            };
            lowpass_normalized(samples, normalized_cutoff(center, sample_rate), sample_rate);

            let peak = curve.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if peak > 0.0 {
                let scaled: Vec<f64> = curve.iter().map(|c| c / peak).collect();
                let env = stretch_curve(&scaled, samples.len());
                for (sample, gain) in samples.iter_mut().zip(env) {
                    *sample *= gain;
                }
            }
        }
    }
}

fn lowpass_normalized(samples: &mut [f64], normalized: f64, sample_rate: f64) {
    let hz = normalized * sample_rate / 2.0;
    BiquadFilter::new(BiquadCoeffs::lowpass(hz, BUTTERWORTH_Q, sample_rate)).process_buffer(samples);
}

/// Band-passes `samples` between 0.9 and 1.1 times the normalized cutoff.
///
/// Returns false (leaving `samples` untouched) when the band collapses.
fn resonance_band(samples: &mut [f64], normalized: f64, sample_rate: f64) -> bool {
    let low = normalized * 0.9;
    let high = (normalized * 1.1).min(MAX_NORMALIZED_CUTOFF);
    if high <= low {
        return false;
    }

    let center = (low * high).sqrt();
    let q = center / (high - low);
    let nyquist = sample_rate / 2.0;
    BiquadFilter::new(BiquadCoeffs::bandpass(center * nyquist, q, sample_rate))
        .process_buffer(samples);
    true
}

/// Median of a slice; even lengths average the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Linearly resamples `curve` onto `len` points spanning the same range.
pub fn stretch_curve(curve: &[f64], len: usize) -> Vec<f64> {
    match curve.len() {
        0 => vec![1.0; len],
        1 => vec![curve[0]; len],
        m => {
            let scale = if len > 1 {
                (m - 1) as f64 / (len - 1) as f64
            } else {
                0.0
            };
            (0..len)
                .map(|i| {
                    let pos = i as f64 * scale;
                    let idx = (pos.floor() as usize).min(m - 2);
                    let frac = pos - idx as f64;
                    curve[idx] + (curve[idx + 1] - curve[idx]) * frac
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 44100.0;

    fn tone(freq: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * freq * i as f64 / SR).sin())
            .collect()
    }

    fn rms(samples: &[f64]) -> f64 {
        (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
    }

    #[test]
    fn test_lowpass_passes_dc() {
        let mut samples = vec![1.0; 2000];
        apply_lowpass(&mut samples, Cutoff::Fixed(1000.0), SR, 1.0);
        assert!((samples[1999] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut samples = vec![1.0; 4000];
        apply_highpass(&mut samples, 1000.0, SR);
        assert!(samples[3999].abs() < 1e-3);
    }

    #[test]
    fn test_cutoff_above_nyquist_is_stable() {
        let mut samples = tone(440.0, 4410);
        apply_lowpass(&mut samples, Cutoff::Fixed(1.0e6), SR, 1.0);
        assert!(samples.iter().all(|s| s.is_finite() && s.abs() < 2.0));

        let mut samples = tone(440.0, 4410);
        apply_highpass(&mut samples, 1.0e6, SR);
        assert!(samples.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_normalized_cutoff_clamp() {
        assert!((normalized_cutoff(11025.0, SR) - 0.5).abs() < 1e-12);
        assert_eq!(normalized_cutoff(30000.0, SR), MAX_NORMALIZED_CUTOFF);
        assert_eq!(normalized_cutoff(f64::NAN, SR), MAX_NORMALIZED_CUTOFF);
        assert!(normalized_cutoff(0.0, SR) > 0.0);
    }

    #[test]
    fn test_resonance_emphasizes_cutoff() {
        let n = 8820;
        let mut plain = tone(1000.0, n);
        let mut resonant = plain.clone();
        apply_lowpass(&mut plain, Cutoff::Fixed(1000.0), SR, 1.0);
        apply_lowpass(&mut resonant, Cutoff::Fixed(1000.0), SR, 2.0);
        assert!(rms(&resonant[n / 2..]) > rms(&plain[n / 2..]));
    }

    #[test]
    fn test_resonance_at_or_below_one_is_plain_lowpass() {
        let mut a = tone(500.0, 1000);
        let mut b = a.clone();
        apply_lowpass(&mut a, Cutoff::Fixed(800.0), SR, 1.0);
        apply_lowpass(&mut b, Cutoff::Fixed(800.0), SR, 0.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_stretch_curve() {
        assert_eq!(stretch_curve(&[0.0, 1.0], 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(stretch_curve(&[0.5], 3), vec![0.5; 3]);
        assert_eq!(stretch_curve(&[0.0, 1.0], 1), vec![0.0]);
        assert!(stretch_curve(&[0.0, 1.0], 0).is_empty());
    }

    #[test]
    fn test_sweep_applies_brightness_envelope() {
        let n = 4410;
        let curve: Vec<f64> = (0..n).map(|i| 200.0 + 8000.0 * i as f64 / n as f64).collect();
        let mut samples = vec![1.0; n];
        apply_lowpass(&mut samples, Cutoff::Sweep(&curve), SR, 2.0);
        // Settled DC times a rising envelope
        assert!(samples[n / 4] < samples[n - 1]);
        assert!((samples[n - 1] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_sweep_with_non_positive_peak_skips_envelope() {
        let curve = vec![0.0; 10];
        let mut samples = vec![1.0; 10];
        apply_lowpass(&mut samples, Cutoff::Sweep(&curve), SR, 1.0);
        assert!(samples.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_empty_buffer() {
        let mut samples: Vec<f64> = Vec::new();
        apply_lowpass(&mut samples, Cutoff::Fixed(1000.0), SR, 2.0);
        apply_highpass(&mut samples, 1000.0, SR);
        assert!(samples.is_empty());
    }
}
