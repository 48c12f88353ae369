//! Score loading from YAML or JSON sources.
//!
//! Files are dispatched by extension. Strings can be parsed directly with
//! [`Score::from_yaml_str`] and [`Score::from_json_str`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::score::Score;

/// Recognized YAML extensions.
pub const YAML_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Recognized JSON extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Identifies the source format of a score file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreFormat {
    Yaml,
    Json,
}

impl ScoreFormat {
    /// Determines the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, SpecError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        if YAML_EXTENSIONS.contains(&extension.as_str()) {
            Ok(ScoreFormat::Yaml)
        } else if JSON_EXTENSIONS.contains(&extension.as_str()) {
            Ok(ScoreFormat::Json)
        } else {
            Err(SpecError::UnsupportedExtension(extension))
        }
    }

    /// Returns the string representation for reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreFormat::Yaml => "yaml",
            ScoreFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for ScoreFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A loaded score with source provenance.
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// The parsed score.
    pub score: Score,
    /// Source format.
    pub format: ScoreFormat,
    /// BLAKE3 hash of the source file content (hex string).
    pub source_hash: String,
}

impl Score {
    /// Parses a score from a YAML string.
    pub fn from_yaml_str(content: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parses a score from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serializes the score to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Loads a score from a file path, dispatching by extension.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use dropforge_spec::input::load_score;
///
/// let loaded = load_score(Path::new("song.yaml")).unwrap();
/// println!("{} sections", loaded.score.sections.len());
/// ```
pub fn load_score(path: &Path) -> Result<LoadResult, SpecError> {
    let format = ScoreFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let score = match format {
        ScoreFormat::Yaml => Score::from_yaml_str(&content)?,
        ScoreFormat::Json => Score::from_json_str(&content)?,
    };

    tracing::debug!(
        path = %path.display(),
        format = %format,
        sections = score.sections.len(),
        "loaded score"
    );

    Ok(LoadResult {
        score,
        format,
        source_hash,
    })
}
