//! Named automation curves applied on top of a note's own envelope.
//!
//! Every curve is a gain in [0, 1] over the note. `amount` blends between
//! unity gain (0.0) and the full curve (1.0):
//!
//! ```text
//! gain = 1 - amount + amount × curve
//! ```

use std::f64::consts::PI;

use crate::oscillator::{linspace, TWO_PI};

/// Rate of the `pulse` curve in Hz.
pub const PULSE_RATE: f64 = 4.0;

/// Automation curve shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationCurve {
    /// Linear rise from 0 to 1 over the note.
    FadeIn,
    /// Linear fall from 1 to 0 over the note.
    FadeOut,
    /// Half sine: silent at both ends, full in the middle.
    Swell,
    /// 4 Hz tremolo between 0 and 1.
    Pulse,
    /// Constant 1; used for unrecognized names.
    Unity,
}

impl AutomationCurve {
    /// Maps a curve name; unknown names are [`AutomationCurve::Unity`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "fade_in" => AutomationCurve::FadeIn,
            "fade_out" => AutomationCurve::FadeOut,
            "swell" => AutomationCurve::Swell,
            "pulse" => AutomationCurve::Pulse,
            _ => AutomationCurve::Unity,
        }
    }

    /// Curve value at `progress` (0..=1 through the note) and `time` seconds
    /// into it.
    pub fn value(&self, progress: f64, time: f64) -> f64 {
        match self {
            AutomationCurve::FadeIn => progress,
            AutomationCurve::FadeOut => 1.0 - progress,
            AutomationCurve::Swell => (PI * progress).sin(),
            AutomationCurve::Pulse => 0.5 + 0.5 * (TWO_PI * PULSE_RATE * time).sin(),
            AutomationCurve::Unity => 1.0,
        }
    }

    /// Multiplies the blended curve into a rendered note in place.
    pub fn apply(&self, samples: &mut [f64], sample_rate: f64, amount: f64) {
        if *self == AutomationCurve::Unity || samples.is_empty() {
            return;
        }
        let duration = samples.len() as f64 / sample_rate;
        let progress = linspace(0.0, 1.0, samples.len());
        for (sample, p) in samples.iter_mut().zip(progress) {
            let curve = self.value(p, p * duration);
            *sample *= 1.0 - amount + amount * curve;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(AutomationCurve::from_name("fade_in"), AutomationCurve::FadeIn);
        assert_eq!(AutomationCurve::from_name("fade_out"), AutomationCurve::FadeOut);
        assert_eq!(AutomationCurve::from_name("swell"), AutomationCurve::Swell);
        assert_eq!(AutomationCurve::from_name("pulse"), AutomationCurve::Pulse);
        assert_eq!(AutomationCurve::from_name("wobble"), AutomationCurve::Unity);
    }

    #[test]
    fn test_fades() {
        let mut up = vec![1.0; 5];
        AutomationCurve::FadeIn.apply(&mut up, 100.0, 1.0);
        assert_eq!(up, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let mut down = vec![1.0; 5];
        AutomationCurve::FadeOut.apply(&mut down, 100.0, 1.0);
        assert_eq!(down, vec![1.0, 0.75, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn test_swell_peaks_in_middle() {
        let mut buf = vec![1.0; 101];
        AutomationCurve::Swell.apply(&mut buf, 1000.0, 1.0);
        assert!(buf[0].abs() < 1e-12);
        assert!((buf[50] - 1.0).abs() < 1e-12);
        assert!(buf[100].abs() < 1e-12);
    }

    #[test]
    fn test_pulse_stays_in_unit_range() {
        let mut buf = vec![1.0; 44100];
        AutomationCurve::Pulse.apply(&mut buf, 44100.0, 1.0);
        assert!(buf.iter().all(|g| (0.0..=1.0).contains(g)));
        assert!(buf.iter().any(|&g| g < 0.01));
    }

    #[test]
    fn test_amount_blends_with_unity() {
        let mut half = vec![1.0; 3];
        AutomationCurve::FadeIn.apply(&mut half, 100.0, 0.5);
        assert_eq!(half, vec![0.5, 0.75, 1.0]);

        let mut none = vec![1.0; 3];
        AutomationCurve::FadeOut.apply(&mut none, 100.0, 0.0);
        assert_eq!(none, vec![1.0; 3]);
    }

    #[test]
    fn test_unity_leaves_buffer_alone() {
        let mut buf = vec![0.3, -0.2];
        AutomationCurve::Unity.apply(&mut buf, 100.0, 1.0);
        assert_eq!(buf, vec![0.3, -0.2]);
    }
}
