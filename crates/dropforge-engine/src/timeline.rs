//! Timeline renderer: turns sections and tracks into one mixed buffer.
//!
//! Sections play back to back. Inside a section every track is laid out
//! according to its role category:
//!
//! - drums fire a half-beat hit on every beat whose pattern step is non-zero
//! - melodic tracks walk their cyclic `notes`/`durations` lists with a cursor,
//!   clipping the last note at the section end
//! - sweeps and risers span the whole section
//! - impacts last two beats from the section start
//!
//! Everything is summed into a [`MasterBuffer`]; nothing ever overwrites.

use dropforge_spec::{
    note_to_freq, RoleCategory, Score, Section, Track, BEATS_PER_BAR, MAX_DURATION_SECONDS,
};
use rand_pcg::Pcg32;

use crate::automation::AutomationCurve;
use crate::error::{EngineError, EngineResult};
use crate::oscillator::sample_count;
use crate::rng::create_track_rng;
use crate::synthesis::{voice_for, Voice};

/// Drum hit length in beats.
pub const DRUM_HIT_BEATS: f64 = 0.5;

/// Impact length in beats.
pub const IMPACT_BEATS: f64 = 2.0;

/// The mix bus. Only ever added to.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterBuffer {
    samples: Vec<f64>,
}

impl MasterBuffer {
    /// Creates a silent buffer of `len` samples.
    pub fn new(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Adds `source × gain` starting at `offset`.
    ///
    /// Whatever falls past the end of the buffer is dropped.
    pub fn accumulate(&mut self, offset: usize, source: &[f64], gain: f64) {
        if offset >= self.samples.len() {
            return;
        }
        for (dst, src) in self.samples[offset..].iter_mut().zip(source) {
            *dst += src * gain;
        }
    }
}

/// Output of the timeline stage: the unmastered mix and every kick trigger.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub master: MasterBuffer,
    /// Kick trigger times in seconds from the start, in render order.
    pub kick_times: Vec<f64>,
    pub sample_rate: f64,
}

impl Timeline {
    /// Length of the mix in seconds.
    pub fn duration(&self) -> f64 {
        self.master.len() as f64 / self.sample_rate
    }
}

/// Checks the timing fields the renderer divides by, and the total length.
pub(crate) fn check_timing(score: &Score) -> EngineResult<()> {
    if !(score.tempo > 0.0) || !score.tempo.is_finite() {
        return Err(EngineError::InvalidTempo { tempo: score.tempo });
    }
    if score.sample_rate == 0 {
        return Err(EngineError::InvalidSampleRate {
            rate: score.sample_rate,
        });
    }
    let seconds = score.total_duration();
    if seconds > MAX_DURATION_SECONDS {
        return Err(EngineError::ScoreTooLong {
            seconds,
            limit: MAX_DURATION_SECONDS,
        });
    }
    Ok(())
}

/// Renders every section of a score into a master buffer.
///
/// The score is assumed to have passed validation; only an unresolvable note,
/// an unusable tempo/sample rate or an over-long score aborts the render.
pub fn render_timeline(score: &Score) -> EngineResult<Timeline> {
    check_timing(score)?;

    let sample_rate = score.sample_rate as f64;
    let total = sample_count(score.total_duration(), sample_rate);
    let mut renderer = Renderer {
        score,
        sample_rate,
        master: MasterBuffer::new(total),
        kick_times: Vec::new(),
    };

    let mut current_time = 0.0;
    for (section_index, section) in score.sections.iter().enumerate() {
        tracing::debug!(
            "Rendering section {} '{}' ({} bars) at {:.3}s",
            section_index,
            section.name,
            section.bars,
            current_time
        );
        renderer.render_section(section_index as u32, section, current_time)?;
        current_time += score.section_duration(section);
    }

    Ok(Timeline {
        master: renderer.master,
        kick_times: renderer.kick_times,
        sample_rate,
    })
}

struct Renderer<'a> {
    score: &'a Score,
    sample_rate: f64,
    master: MasterBuffer,
    kick_times: Vec<f64>,
}

impl Renderer<'_> {
    fn offset(&self, time: f64) -> usize {
        (time.max(0.0) * self.sample_rate).round() as usize
    }

    fn render_section(
        &mut self,
        section_index: u32,
        section: &Section,
        start: f64,
    ) -> EngineResult<()> {
        let section_duration = self.score.section_duration(section);

        for (track_index, track) in section.tracks.iter().enumerate() {
            let mut rng = create_track_rng(self.score.seed, section_index, track_index as u32);
            tracing::debug!(
                "  track {} ({}) volume {}",
                track_index,
                track.role,
                track.volume
            );

            match track.role.category() {
                RoleCategory::Drum => self.render_drums(section, track, start, &mut rng),
                RoleCategory::Melodic => {
                    self.render_notes(track, start, section_duration, &mut rng)?
                }
                RoleCategory::SectionFx => {
                    let voice = voice_for(track, 0.0, 0.0);
                    let wave = voice.render(section_duration, self.sample_rate, &mut rng);
                    let at = self.offset(start);
                    self.master.accumulate(at, &wave, track.volume);
                }
                RoleCategory::PointFx => {
                    let voice = voice_for(track, 0.0, 0.0);
                    let length = self.score.beat_duration() * IMPACT_BEATS;
                    let wave = voice.render(length, self.sample_rate, &mut rng);
                    let at = self.offset(start);
                    self.master.accumulate(at, &wave, track.volume);
                }
            }
        }

        Ok(())
    }

    fn render_drums(&mut self, section: &Section, track: &Track, start: f64, rng: &mut Pcg32) {
        if track.pattern.is_empty() {
            tracing::warn!("Skipping {} track with an empty pattern", track.role);
            return;
        }

        let voice = voice_for(track, 0.0, 0.0);
        let is_kick = matches!(voice, Voice::Kick(_));
        let beat = self.score.beat_duration();
        let bar = self.score.bar_duration();
        let steps = track.pattern.len();

        for bar_index in 0..section.bars {
            for beat_index in 0..BEATS_PER_BAR {
                let velocity = track.pattern[beat_index as usize % steps].velocity();
                if velocity <= 0.0 {
                    continue;
                }

                let hit_time = start + bar_index as f64 * bar + beat_index as f64 * beat;
                let wave = voice.render(beat * DRUM_HIT_BEATS, self.sample_rate, rng);
                let at = self.offset(hit_time);
                self.master.accumulate(at, &wave, velocity * track.volume);

                if is_kick {
                    self.kick_times.push(hit_time);
                }
            }
        }
    }

    fn render_notes(
        &mut self,
        track: &Track,
        start: f64,
        section_duration: f64,
        rng: &mut Pcg32,
    ) -> EngineResult<()> {
        if track.notes.is_empty() || track.durations.is_empty() {
            tracing::warn!(
                "Skipping {} track: notes and durations must both be non-empty",
                track.role
            );
            return Ok(());
        }
        let beat = self.score.beat_duration();
        // One pass over the durations must cover at least a sample, or the
        // cursor loop would spin without producing audio.
        if sample_count(track.total_beats() * beat, self.sample_rate) == 0 {
            tracing::warn!(
                "Skipping {} track: durations advance less than one sample per cycle",
                track.role
            );
            return Ok(());
        }

        let automation = track.automation.as_deref().map(AutomationCurve::from_name);
        let mut pos = 0.0;
        let mut index = 0;

        while pos < section_duration {
            let note = &track.notes[index % track.notes.len()];
            let step = track.durations[index % track.durations.len()] * beat;
            let length = step.min(section_duration - pos);

            let frequency = note_to_freq(note)?;
            let bend_frequency = if track.bend_notes.is_empty() {
                frequency
            } else {
                note_to_freq(&track.bend_notes[index % track.bend_notes.len()])?
            };

            let voice = voice_for(track, frequency, bend_frequency);
            let mut wave = voice.render(length, self.sample_rate, rng);
            if let Some(curve) = automation {
                curve.apply(&mut wave, self.sample_rate, track.automation_amount());
            }

            let at = self.offset(start + pos);
            self.master.accumulate(at, &wave, track.volume);

            pos += step;
            index += 1;
        }

        Ok(())
    }
}
