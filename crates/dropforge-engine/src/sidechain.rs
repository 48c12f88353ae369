//! Sidechain ducking driven by kick trigger times.
//!
//! For every kick the gain ramps linearly from its current value down to
//! `1 - strength` over the attack window, then recovers along
//! `1 - strength · e^(-5x)` for `x` in 0..=1 over the release window. The raw
//! gain curve is smoothed with a Gaussian kernel before being multiplied into
//! the mix.

use crate::oscillator::linspace;

/// Standard deviation of the smoothing kernel, in samples.
pub const SMOOTHING_SIGMA: f64 = 30.0;

/// Kernel radius in standard deviations.
const SMOOTHING_TRUNCATE: f64 = 4.0;

/// Ducking style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidechainStyle {
    /// 5 ms attack, quarter-beat release.
    Pump,
    /// 10 ms attack, 40 % of a beat release.
    Duck,
    /// 20 ms attack, 15 % of a beat release, half strength.
    Subtle,
}

impl SidechainStyle {
    /// Maps a style name; unknown names are [`SidechainStyle::Subtle`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "pump" => SidechainStyle::Pump,
            "duck" => SidechainStyle::Duck,
            _ => SidechainStyle::Subtle,
        }
    }

    /// Attack time in seconds.
    pub fn attack(&self) -> f64 {
        match self {
            SidechainStyle::Pump => 0.005,
            SidechainStyle::Duck => 0.01,
            SidechainStyle::Subtle => 0.02,
        }
    }

    /// Release time in seconds for a given beat length.
    pub fn release(&self, beat_duration: f64) -> f64 {
        match self {
            SidechainStyle::Pump => beat_duration * 0.25,
            SidechainStyle::Duck => beat_duration * 0.4,
            SidechainStyle::Subtle => beat_duration * 0.15,
        }
    }

    /// Strength after the style's discount.
    pub fn effective_strength(&self, strength: f64) -> f64 {
        match self {
            SidechainStyle::Subtle => strength * 0.5,
            _ => strength,
        }
    }
}

/// Sidechain settings for one render.
#[derive(Debug, Clone, Copy)]
pub struct SidechainParams {
    pub style: SidechainStyle,
    /// Depth of the duck, 0.0 to 1.0.
    pub strength: f64,
    /// Beat length in seconds.
    pub beat_duration: f64,
    pub sample_rate: f64,
}

/// Builds the unsmoothed gain curve for `num_samples` samples.
pub fn duck_envelope(num_samples: usize, kick_times: &[f64], params: &SidechainParams) -> Vec<f64> {
    let mut envelope = vec![1.0; num_samples];
    let strength = params.style.effective_strength(params.strength);
    let floor = 1.0 - strength;
    let attack_samples = (params.style.attack() * params.sample_rate) as usize;
    let release_samples = (params.style.release(params.beat_duration) * params.sample_rate) as usize;

    for &kick in kick_times {
        let attack_start = (kick * params.sample_rate).max(0.0) as usize;
        if attack_start >= num_samples {
            continue;
        }

        let attack_end = (attack_start + attack_samples).min(num_samples);
        if attack_end > attack_start {
            let from = envelope[attack_start];
            let ramp = linspace(from, floor, attack_end - attack_start);
            envelope[attack_start..attack_end].copy_from_slice(&ramp);
        }

        let release_end = (attack_end + release_samples).min(num_samples);
        if release_end > attack_end {
            let recovery = linspace(0.0, 1.0, release_end - attack_end)
                .into_iter()
                .map(|x| 1.0 - strength * (-5.0 * x).exp());
            for (gain, value) in envelope[attack_end..release_end].iter_mut().zip(recovery) {
                *gain = value;
            }
        }
    }

    envelope
}

/// Gaussian smoothing with mirrored edges (`d c b a | a b c d`).
pub fn gaussian_smooth(values: &[f64], sigma: f64) -> Vec<f64> {
    if values.is_empty() || sigma <= 0.0 {
        return values.to_vec();
    }

    let radius = (SMOOTHING_TRUNCATE * sigma + 0.5) as usize;
    let mut kernel: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let x = i as f64 - radius as f64;
            (-0.5 * (x / sigma).powi(2)).exp()
        })
        .collect();
    let total: f64 = kernel.iter().sum();
    kernel.iter_mut().for_each(|k| *k /= total);

    let len = values.len() as isize;
    let reflect = |mut i: isize| -> usize {
        // Fold until inside; a kernel wider than the signal can bounce more than once
        let period = 2 * len;
        i = i.rem_euclid(period);
        if i >= len {
            i = period - 1 - i;
        }
        i as usize
    };

    (0..len)
        .map(|n| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, weight)| weight * values[reflect(n + k as isize - radius as isize)])
                .sum()
        })
        .collect()
}

/// Ducks `samples` in place at every kick time.
///
/// An empty trigger list leaves the buffer untouched.
pub fn apply_sidechain(samples: &mut [f64], kick_times: &[f64], params: &SidechainParams) {
    if kick_times.is_empty() || samples.is_empty() {
        return;
    }
    let raw = duck_envelope(samples.len(), kick_times, params);
    let smooth = gaussian_smooth(&raw, SMOOTHING_SIGMA);
    for (sample, gain) in samples.iter_mut().zip(smooth) {
        *sample *= gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 1000.0;

    fn params(style: SidechainStyle, strength: f64) -> SidechainParams {
        SidechainParams {
            style,
            strength,
            beat_duration: 0.5,
            sample_rate: SR,
        }
    }

    #[test]
    fn test_style_names() {
        assert_eq!(SidechainStyle::from_name("pump"), SidechainStyle::Pump);
        assert_eq!(SidechainStyle::from_name("duck"), SidechainStyle::Duck);
        assert_eq!(SidechainStyle::from_name("subtle"), SidechainStyle::Subtle);
        assert_eq!(SidechainStyle::from_name("squash"), SidechainStyle::Subtle);
    }

    #[test]
    fn test_pump_envelope_shape() {
        let p = params(SidechainStyle::Pump, 0.8);
        let env = duck_envelope(1000, &[0.1], &p);
        // 5-sample attack from 1.0 to 0.2, then 125 samples of release.
        assert_eq!(env[99], 1.0);
        assert_eq!(env[100], 1.0);
        assert!((env[104] - 0.2).abs() < 1e-12);
        assert!((env[105] - 0.2).abs() < 1e-12);
        assert!((env[229] - (1.0 - 0.8 * (-5.0_f64).exp())).abs() < 1e-12);
        assert_eq!(env[230], 1.0);
    }

    #[test]
    fn test_subtle_halves_strength() {
        let p = params(SidechainStyle::Subtle, 0.8);
        let env = duck_envelope(1000, &[0.0], &p);
        let min = env.iter().copied().fold(f64::INFINITY, f64::min);
        assert!((min - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_kicks_past_end_are_ignored() {
        let p = params(SidechainStyle::Duck, 0.5);
        assert_eq!(duck_envelope(100, &[5.0], &p), vec![1.0; 100]);
    }

    #[test]
    fn test_gaussian_preserves_constants() {
        let smooth = gaussian_smooth(&vec![0.7; 50], 30.0);
        assert!(smooth.iter().all(|v| (v - 0.7).abs() < 1e-12));
    }

    #[test]
    fn test_gaussian_spreads_an_impulse() {
        let mut impulse = vec![0.0; 301];
        impulse[150] = 1.0;
        let smooth = gaussian_smooth(&impulse, 30.0);
        let total: f64 = smooth.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(smooth[150] > smooth[180]);
        assert!((smooth[120] - smooth[180]).abs() < 1e-15);
    }

    #[test]
    fn test_sidechain_reduces_level_after_kick() {
        let mut mix = vec![0.5; 1000];
        apply_sidechain(&mut mix, &[0.2], &params(SidechainStyle::Pump, 0.7));
        assert!(mix[220] < 0.5 * 0.9);
        assert!(mix[220] < mix[150]);
        assert!((mix[900] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_stronger_duck_goes_deeper() {
        let duck = |strength| {
            let mut mix = vec![1.0; 1000];
            apply_sidechain(&mut mix, &[0.2], &params(SidechainStyle::Pump, strength));
            mix.iter().copied().fold(f64::INFINITY, f64::min)
        };
        assert!(duck(0.9) < duck(0.5));
        assert!(duck(0.5) < duck(0.2));
    }

    #[test]
    fn test_no_kicks_is_a_no_op() {
        let mut mix = vec![0.25, -0.5, 0.75];
        apply_sidechain(&mut mix, &[], &params(SidechainStyle::Pump, 0.7));
        assert_eq!(mix, vec![0.25, -0.5, 0.75]);
    }
}
