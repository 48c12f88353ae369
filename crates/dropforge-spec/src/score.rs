//! Score data model.
//!
//! A score is a tempo, a sample rate, and a list of sections played back to
//! back. Each section holds tracks; each track names an [`InstrumentRole`] and
//! carries either a drum `pattern` or cyclic `notes`/`durations` lists plus
//! optional role-specific parameters.

use serde::{Deserialize, Serialize};

/// Beats per bar. Scores are always in 4/4.
pub const BEATS_PER_BAR: u32 = 4;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Longest score the engine will render, in seconds.
pub const MAX_DURATION_SECONDS: f64 = 3600.0;

/// Default sidechain style name.
pub const DEFAULT_SIDECHAIN_STYLE: &str = "pump";

/// Default sidechain strength.
pub const DEFAULT_SIDECHAIN_STRENGTH: f64 = 0.7;

/// Default pitch-bend bass style name.
pub const DEFAULT_BASS_STYLE: &str = "pluck";

/// Default arpeggio frequency multipliers.
pub const DEFAULT_ARP_PATTERN: [f64; 4] = [1.0, 1.5, 2.0, 1.5];

/// Recognized sidechain style names.
pub const SIDECHAIN_STYLES: [&str; 3] = ["pump", "duck", "subtle"];

/// Recognized automation curve names.
pub const AUTOMATION_CURVES: [&str; 4] = ["fade_in", "fade_out", "swell", "pulse"];

/// Recognized pitch-bend bass style names.
pub const BASS_STYLES: [&str; 3] = ["pluck", "reese", "sine"];

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_sidechain_style() -> String {
    DEFAULT_SIDECHAIN_STYLE.to_string()
}

fn default_sidechain_strength() -> f64 {
    DEFAULT_SIDECHAIN_STRENGTH
}

fn default_volume() -> f64 {
    1.0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A complete song description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Tempo in beats per minute.
    pub tempo: f64,
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Seed for every noise source in the render.
    #[serde(default)]
    pub seed: u32,
    /// Whether kick-triggered sidechain ducking is applied to the mix.
    #[serde(default)]
    pub sidechain: bool,
    /// Sidechain style name (`pump`, `duck`, `subtle`).
    #[serde(default = "default_sidechain_style")]
    pub sidechain_style: String,
    /// Sidechain depth (0.0 to 1.0).
    #[serde(default = "default_sidechain_strength")]
    pub sidechain_strength: f64,
    /// Sections in playback order.
    pub sections: Vec<Section>,
}

impl Score {
    /// Creates a score with default settings and no sections.
    pub fn new(tempo: f64) -> Self {
        Self {
            tempo,
            sample_rate: DEFAULT_SAMPLE_RATE,
            seed: 0,
            sidechain: false,
            sidechain_style: default_sidechain_style(),
            sidechain_strength: DEFAULT_SIDECHAIN_STRENGTH,
            sections: Vec::new(),
        }
    }

    /// Sets the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Sets the noise seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Enables sidechain ducking with the given style and strength.
    pub fn with_sidechain(mut self, style: impl Into<String>, strength: f64) -> Self {
        self.sidechain = true;
        self.sidechain_style = style.into();
        self.sidechain_strength = strength;
        self
    }

    /// Appends a section.
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Duration of one beat in seconds.
    pub fn beat_duration(&self) -> f64 {
        60.0 / self.tempo
    }

    /// Duration of one bar in seconds.
    pub fn bar_duration(&self) -> f64 {
        self.beat_duration() * BEATS_PER_BAR as f64
    }

    /// Duration of a section in seconds.
    pub fn section_duration(&self, section: &Section) -> f64 {
        section.bars as f64 * self.bar_duration()
    }

    /// Total duration of the score in seconds.
    pub fn total_duration(&self) -> f64 {
        self.sections
            .iter()
            .map(|section| self.section_duration(section))
            .sum()
    }
}

/// A time-bounded segment of the song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Label, used only in diagnostics.
    #[serde(default)]
    pub name: String,
    /// Length in bars.
    pub bars: u32,
    /// Tracks playing during this section.
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(name: impl Into<String>, bars: u32) -> Self {
        Self {
            name: name.into(),
            bars,
            tracks: Vec::new(),
        }
    }

    /// Appends a track.
    pub fn track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    /// Length in beats.
    pub fn beats(&self) -> u64 {
        u64::from(self.bars) * u64::from(BEATS_PER_BAR)
    }
}

/// The closed set of instrument roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentRole {
    Kick,
    Hihat,
    Snare,
    Clap,
    Percussion,
    Bass,
    SubBass,
    Melody,
    Pad,
    Pluck,
    Arp,
    Supersaw,
    FutureBass,
    ReeseBass,
    PluckBass,
    DubstepBass,
    PitchBendBass,
    Sweep,
    WhiteNoiseRiser,
    Impact,
}

/// How a role's events are laid out on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCategory {
    /// Fixed-length hits driven by a velocity pattern.
    Drum,
    /// Notes walked from cyclic notes/durations lists.
    Melodic,
    /// One render spanning the whole section.
    SectionFx,
    /// One fixed-length render at the section start.
    PointFx,
}

impl InstrumentRole {
    /// Every role, in declaration order.
    pub const ALL: [InstrumentRole; 20] = [
        InstrumentRole::Kick,
        InstrumentRole::Hihat,
        InstrumentRole::Snare,
        InstrumentRole::Clap,
        InstrumentRole::Percussion,
        InstrumentRole::Bass,
        InstrumentRole::SubBass,
        InstrumentRole::Melody,
        InstrumentRole::Pad,
        InstrumentRole::Pluck,
        InstrumentRole::Arp,
        InstrumentRole::Supersaw,
        InstrumentRole::FutureBass,
        InstrumentRole::ReeseBass,
        InstrumentRole::PluckBass,
        InstrumentRole::DubstepBass,
        InstrumentRole::PitchBendBass,
        InstrumentRole::Sweep,
        InstrumentRole::WhiteNoiseRiser,
        InstrumentRole::Impact,
    ];

    /// Returns the document tag for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentRole::Kick => "kick",
            InstrumentRole::Hihat => "hihat",
            InstrumentRole::Snare => "snare",
            InstrumentRole::Clap => "clap",
            InstrumentRole::Percussion => "percussion",
            InstrumentRole::Bass => "bass",
            InstrumentRole::SubBass => "sub_bass",
            InstrumentRole::Melody => "melody",
            InstrumentRole::Pad => "pad",
            InstrumentRole::Pluck => "pluck",
            InstrumentRole::Arp => "arp",
            InstrumentRole::Supersaw => "supersaw",
            InstrumentRole::FutureBass => "future_bass",
            InstrumentRole::ReeseBass => "reese_bass",
            InstrumentRole::PluckBass => "pluck_bass",
            InstrumentRole::DubstepBass => "dubstep_bass",
            InstrumentRole::PitchBendBass => "pitch_bend_bass",
            InstrumentRole::Sweep => "sweep",
            InstrumentRole::WhiteNoiseRiser => "white_noise_riser",
            InstrumentRole::Impact => "impact",
        }
    }

    /// Returns the timeline category of this role.
    pub fn category(&self) -> RoleCategory {
        match self {
            InstrumentRole::Kick
            | InstrumentRole::Hihat
            | InstrumentRole::Snare
            | InstrumentRole::Clap
            | InstrumentRole::Percussion => RoleCategory::Drum,
            InstrumentRole::Bass
            | InstrumentRole::SubBass
            | InstrumentRole::Melody
            | InstrumentRole::Pad
            | InstrumentRole::Pluck
            | InstrumentRole::Arp
            | InstrumentRole::Supersaw
            | InstrumentRole::FutureBass
            | InstrumentRole::ReeseBass
            | InstrumentRole::PluckBass
            | InstrumentRole::DubstepBass
            | InstrumentRole::PitchBendBass => RoleCategory::Melodic,
            InstrumentRole::Sweep | InstrumentRole::WhiteNoiseRiser => RoleCategory::SectionFx,
            InstrumentRole::Impact => RoleCategory::PointFx,
        }
    }
}

impl std::fmt::Display for InstrumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One step of a drum pattern: a velocity or an on/off flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternStep {
    /// `true` plays at full velocity, `false` is silent.
    Flag(bool),
    /// Velocity, expected in [0, 1].
    Velocity(f64),
}

impl PatternStep {
    /// Returns the numeric velocity of this step.
    pub fn velocity(&self) -> f64 {
        match self {
            PatternStep::Flag(true) => 1.0,
            PatternStep::Flag(false) => 0.0,
            PatternStep::Velocity(v) => *v,
        }
    }
}

impl From<f64> for PatternStep {
    fn from(v: f64) -> Self {
        PatternStep::Velocity(v)
    }
}

impl From<bool> for PatternStep {
    fn from(flag: bool) -> Self {
        PatternStep::Flag(flag)
    }
}

/// One instrument's part within a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Instrument role.
    #[serde(rename = "type")]
    pub role: InstrumentRole,
    /// Linear gain applied to everything this track renders.
    #[serde(default = "default_volume")]
    pub volume: f64,
    /// Drum velocities, indexed cyclically by beat.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pattern: Vec<PatternStep>,
    /// Note tokens, walked cyclically.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    /// Note lengths in beats, walked cyclically.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub durations: Vec<f64>,
    /// Pitch-bend target notes, paired with `notes`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bend_notes: Vec<String>,
    /// Pitch-bend synthesis style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bass_style: Option<String>,
    /// Supersaw detune spread.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detune: Option<f64>,
    /// Supersaw oscillator count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voices: Option<u32>,
    /// Dubstep LFO rate in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wobble_rate: Option<f64>,
    /// Kick pitch-sweep depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub punch: Option<f64>,
    /// Hi-hat/snare tonal balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<f64>,
    /// Named automation curve applied to every note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation: Option<String>,
    /// Blend between unity gain (0.0) and the full curve (1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation_amount: Option<f64>,
    /// Arpeggio frequency multipliers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arp_pattern: Option<Vec<f64>>,
    /// Sweep direction.
    #[serde(default, skip_serializing_if = "is_false")]
    pub reverse: bool,
    /// Sweep start frequency in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_freq: Option<f64>,
    /// Sweep end frequency in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_freq: Option<f64>,
}

impl Track {
    /// Creates a track with only a role set.
    pub fn new(role: InstrumentRole) -> Self {
        Self {
            role,
            volume: 1.0,
            pattern: Vec::new(),
            notes: Vec::new(),
            durations: Vec::new(),
            bend_notes: Vec::new(),
            bass_style: None,
            detune: None,
            voices: None,
            wobble_rate: None,
            punch: None,
            tone: None,
            automation: None,
            automation_amount: None,
            arp_pattern: None,
            reverse: false,
            start_freq: None,
            end_freq: None,
        }
    }

    /// Creates a drum track from a velocity pattern.
    pub fn drum<P: Into<PatternStep>>(
        role: InstrumentRole,
        pattern: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            pattern: pattern.into_iter().map(Into::into).collect(),
            ..Self::new(role)
        }
    }

    /// Creates a melodic track from notes and beat durations.
    pub fn melodic<S: Into<String>>(
        role: InstrumentRole,
        notes: impl IntoIterator<Item = S>,
        durations: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            notes: notes.into_iter().map(Into::into).collect(),
            durations: durations.into_iter().collect(),
            ..Self::new(role)
        }
    }

    /// Sets the volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Sets the automation curve and amount.
    pub fn with_automation(mut self, curve: impl Into<String>, amount: f64) -> Self {
        self.automation = Some(curve.into());
        self.automation_amount = Some(amount);
        self
    }

    /// Kick punch, default 1.0.
    pub fn punch(&self) -> f64 {
        self.punch.unwrap_or(1.0)
    }

    /// Hi-hat/snare tone, default 0.5.
    pub fn tone(&self) -> f64 {
        self.tone.unwrap_or(0.5)
    }

    /// Supersaw detune, default 0.03.
    pub fn detune(&self) -> f64 {
        self.detune.unwrap_or(0.03)
    }

    /// Supersaw voice count, default 7.
    pub fn voices(&self) -> u32 {
        self.voices.unwrap_or(7)
    }

    /// Dubstep wobble rate, default 2 Hz.
    pub fn wobble_rate(&self) -> f64 {
        self.wobble_rate.unwrap_or(2.0)
    }

    /// Pitch-bend bass style, default `pluck`.
    pub fn bass_style(&self) -> &str {
        self.bass_style.as_deref().unwrap_or(DEFAULT_BASS_STYLE)
    }

    /// Automation blend amount, default 1.0.
    pub fn automation_amount(&self) -> f64 {
        self.automation_amount.unwrap_or(1.0)
    }

    /// Arpeggio multipliers, default `[1, 1.5, 2, 1.5]`.
    pub fn arp_pattern(&self) -> &[f64] {
        self.arp_pattern.as_deref().unwrap_or(&DEFAULT_ARP_PATTERN)
    }

    /// Sweep start frequency, default 100 Hz.
    pub fn start_freq(&self) -> f64 {
        self.start_freq.unwrap_or(100.0)
    }

    /// Sweep end frequency, default 8000 Hz.
    pub fn end_freq(&self) -> f64 {
        self.end_freq.unwrap_or(8000.0)
    }

    /// Sum of `durations` in beats.
    pub fn total_beats(&self) -> f64 {
        self.durations.iter().sum()
    }
}
