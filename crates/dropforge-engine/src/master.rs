//! Mastering chain: soft clip, peak normalize, quantize.
//!
//! The order is fixed. Normalizing first would move the mix into a different
//! part of the saturation curve.

/// Input gain into the `tanh` saturator.
pub const DRIVE: f64 = 0.7;

/// Output gain after the saturator.
pub const MAKEUP: f64 = 1.2;

/// Peak level after normalization.
pub const HEADROOM_PEAK: f64 = 0.95;

/// Full-scale value for 16-bit quantization.
pub const PCM16_SCALE: f64 = 32767.0;

/// `tanh(x · 0.7) · 1.2` on every sample.
pub fn soft_clip(samples: &mut [f64]) {
    for sample in samples.iter_mut() {
        *sample = (*sample * DRIVE).tanh() * MAKEUP;
    }
}

/// Scales the buffer so its peak is `target`. Silent buffers are left alone.
pub fn normalize(samples: &mut [f64], target: f64) {
    let current_peak = peak(samples);
    if current_peak > 0.0 {
        let gain = target / current_peak;
        for sample in samples.iter_mut() {
            *sample *= gain;
        }
    }
}

/// Largest absolute sample value.
pub fn peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0_f64, f64::max)
}

/// Converts to signed 16-bit by scaling with 32767 and truncating toward zero.
pub fn quantize(samples: &[f64]) -> Vec<i16> {
    samples
        .iter()
        .map(|s| (s * PCM16_SCALE).clamp(-PCM16_SCALE, PCM16_SCALE) as i16)
        .collect()
}

/// Runs the full chain and returns 16-bit PCM.
pub fn master(mut samples: Vec<f64>) -> Vec<i16> {
    soft_clip(&mut samples);
    normalize(&mut samples, HEADROOM_PEAK);
    quantize(&samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_is_headroom_limited() {
        let mix: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.37).sin() * 5.0).collect();
        let pcm = master(mix);
        let max = pcm.iter().map(|s| (*s as i32).abs()).max().unwrap_or(0);
        assert!(max <= (HEADROOM_PEAK * PCM16_SCALE).round() as i32);
        assert!(max >= 31000);
    }

    #[test]
    fn test_silence_stays_silent() {
        assert_eq!(master(vec![0.0; 16]), vec![0i16; 16]);
        assert!(master(Vec::new()).is_empty());
    }

    #[test]
    fn test_quantize_truncates() {
        assert_eq!(quantize(&[0.5, -0.5, 1.0, -1.0]), vec![16383, -16383, 32767, -32767]);
        assert_eq!(quantize(&[0.00002]), vec![0]);
    }

    #[test]
    fn test_soft_clip_before_normalize() {
        // A quiet sample relative to the peak ends up louder than a linear scale
        // would put it, because the peak is compressed first.
        let pcm = master(vec![0.1, 10.0]);
        let linear = (0.1 / 10.0 * HEADROOM_PEAK * PCM16_SCALE) as i16;
        assert!(pcm[0] > linear);
        assert_eq!(pcm[1], (HEADROOM_PEAK * PCM16_SCALE) as i16);
    }

    #[test]
    fn test_soft_clip_curve() {
        let mut buf = vec![0.0, 1.0, -100.0];
        soft_clip(&mut buf);
        assert_eq!(buf[0], 0.0);
        assert!((buf[1] - 0.7_f64.tanh() * 1.2).abs() < 1e-12);
        assert!((buf[2] + 1.2).abs() < 1e-9);
    }
}
