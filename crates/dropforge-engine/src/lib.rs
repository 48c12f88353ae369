//! Dropforge Engine
//!
//! Procedural synthesis and timeline mixing for Dropforge scores.
//!
//! # Overview
//!
//! A render runs four stages in a fixed order:
//!
//! 1. **Timeline** - every track's notes and hits are synthesized and summed
//!    into one master buffer; kick trigger times are recorded.
//! 2. **Sidechain** - when enabled, the mix is ducked after every kick.
//! 3. **Mastering** - soft clip, peak normalize to 0.95, quantize to 16 bits.
//! 4. **Container** - the PCM is wrapped in a mono RIFF/WAVE file.
//!
//! # Determinism
//!
//! All noise is drawn from PCG32 streams seeded per track with BLAKE3, so the
//! same score and seed give byte-identical WAV output.
//!
//! # Example
//!
//! ```
//! use dropforge_engine::render_score;
//! use dropforge_spec::{InstrumentRole, Score, Section, Track};
//!
//! let score = Score::new(120.0).with_sample_rate(8000).section(
//!     Section::new("drop", 1).track(Track::drum(InstrumentRole::Kick, [1.0, 0.0, 1.0, 0.0])),
//! );
//!
//! let result = render_score(&score).unwrap();
//! assert_eq!(result.samples.len(), 16000);
//! assert_eq!(result.kick_count, 2);
//! println!("PCM hash: {}", result.wav.pcm_hash);
//! ```
//!
//! # Crate Structure
//!
//! - [`render()`] / [`render_score()`] - Entry points
//! - [`envelope`] - ADSR envelopes
//! - [`filter`] - Biquad low-pass/high-pass with resonance and sweeps
//! - [`oscillator`] - Waveforms, noise, and phase integration
//! - [`synthesis`] - One voice per instrument role
//! - [`automation`] - Named per-note gain curves
//! - [`timeline`] - Section/track layout into the master buffer
//! - [`sidechain`] - Kick-driven ducking
//! - [`master`] - Soft clip, normalize, quantize
//! - [`rng`] - Deterministic RNG with seed derivation
//! - [`wav`] - Deterministic WAV file writer

pub mod automation;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod master;
pub mod oscillator;
pub mod render;
pub mod rng;
pub mod sidechain;
pub mod synthesis;
pub mod timeline;
pub mod wav;

// Re-export main types at crate root
pub use error::{EngineError, EngineResult};
pub use render::{render, render_score, RenderResult};
pub use timeline::{render_timeline, MasterBuffer, Timeline};
pub use wav::WavResult;
