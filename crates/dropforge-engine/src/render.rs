//! Render entry points: score in, mastered WAV out.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use dropforge_spec::Score;

use crate::error::EngineResult;
use crate::master::master;
use crate::sidechain::{apply_sidechain, SidechainParams, SidechainStyle};
use crate::timeline::render_timeline;
use crate::wav::{pcm16_bytes, write_wav, WavFormat, WavResult};

/// Result of rendering a score.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Mastered 16-bit samples.
    pub samples: Vec<i16>,
    /// The WAV container for `samples`.
    pub wav: WavResult,
    /// Number of kick hits that drove the sidechain.
    pub kick_count: usize,
    /// Whether sidechain ducking was applied.
    pub sidechained: bool,
    /// Length in seconds.
    pub duration: f64,
}

/// Renders a score fully in memory.
///
/// Runs the timeline, then sidechain ducking when enabled and at least one
/// kick fired, then the mastering chain.
pub fn render_score(score: &Score) -> EngineResult<RenderResult> {
    let timeline = render_timeline(score)?;
    let duration = timeline.duration();
    let kick_count = timeline.kick_times.len();
    let sidechained = score.sidechain && kick_count > 0;

    let mut mix = timeline.master.into_samples();
    if sidechained {
        let params = SidechainParams {
            style: SidechainStyle::from_name(&score.sidechain_style),
            strength: score.sidechain_strength,
            beat_duration: score.beat_duration(),
            sample_rate: score.sample_rate as f64,
        };
        apply_sidechain(&mut mix, &timeline.kick_times, &params);
    }

    let samples = master(mix);
    let wav = WavResult::from_pcm16(&samples, score.sample_rate);

    tracing::info!(
        "Rendered {:.2}s ({} samples, {} kicks, sidechain {})",
        duration,
        samples.len(),
        kick_count,
        if sidechained { "on" } else { "off" }
    );

    Ok(RenderResult {
        samples,
        wav,
        kick_count,
        sidechained,
        duration,
    })
}

/// Renders a score and writes the WAV file to `output_path`.
///
/// The file is written to a temporary sibling first and renamed into place,
/// so a failed render never leaves a partial file behind.
pub fn render(score: &Score, output_path: &Path) -> EngineResult<RenderResult> {
    let result = render_score(score)?;
    let format = WavFormat::mono(result.wav.sample_rate);
    let pcm = pcm16_bytes(&result.samples);
    write_atomically(output_path, |writer| write_wav(writer, &format, &pcm))?;
    tracing::debug!("Wrote {}", output_path.display());
    Ok(result)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "render".into());
    name.push(".partial");
    path.with_file_name(name)
}

/// Streams into a `.partial` sibling, syncs it, then renames it over `path`.
fn write_atomically<F>(path: &Path, write: F) -> std::io::Result<()>
where
    F: FnOnce(&mut BufWriter<fs::File>) -> std::io::Result<()>,
{
    let temp = temp_sibling(path);
    let written = fs::File::create(&temp).and_then(|file| {
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush()?;
        writer.get_ref().sync_all()
    });
    if let Err(err) = written.and_then(|_| fs::rename(&temp, path)) {
        let _ = fs::remove_file(&temp);
        return Err(err);
    }
    Ok(())
}
