//! Value types returned by the analysis backend.
//!
//! All of these are built once per submission and never mutated afterwards.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Difficulty statistics of a single beatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatmapStatistics {
    /// Approach rate.
    pub ar: f64,
    /// Overall difficulty.
    pub od: f64,
    /// HP drain.
    pub hp: f64,
    /// Circle size.
    pub cs: f64,
    pub bpm: f64,
    pub star_rating: f64,
}

/// Metadata snapshot of one beatmap (difficulty), as served by `/details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatmapMetadata {
    pub title: String,
    pub artist: String,
    /// Mapper username.
    pub creator: String,
    /// Mapper user id. Older backends do not send it.
    #[serde(default)]
    pub creator_id: Option<u32>,
    /// Difficulty name.
    pub version: String,
    pub set_id: u32,
    pub statistics: BeatmapStatistics,
}

/// Pattern kind of an analysis variant.
///
/// Unknown kinds reported by newer backends are kept as [`AnalysisKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnalysisKind {
    Stream,
    Jump,
    Other(String),
}

impl AnalysisKind {
    pub fn as_str(&self) -> &str {
        match self {
            AnalysisKind::Stream => "stream",
            AnalysisKind::Jump => "jump",
            AnalysisKind::Other(name) => name,
        }
    }
}

impl From<&str> for AnalysisKind {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "stream" => AnalysisKind::Stream,
            "jump" => AnalysisKind::Jump,
            other => AnalysisKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AnalysisKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which analysis the backend should run (`/analyze/{kind}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisRequest {
    /// Every kind the backend knows; the response is a list.
    All,
    Stream,
    Jump,
}

impl AnalysisRequest {
    pub fn as_path_segment(self) -> &'static str {
        match self {
            AnalysisRequest::All => "all",
            AnalysisRequest::Stream => "stream",
            AnalysisRequest::Jump => "jump",
        }
    }
}

/// Kind-specific measurements. Each kind reports a subset, so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternMetrics {
    pub short_count: Option<u32>,
    pub medium_count: Option<u32>,
    pub long_count: Option<u32>,
    /// Longest run of the pattern, in notes.
    pub max_length: Option<u32>,
    pub peak_density: Option<f64>,
    pub bpm_consistency: Option<f64>,
}

/// One classification result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisVariant {
    pub kind: AnalysisKind,
    /// In `[0, 1]`. Independent per variant, not normalized across kinds.
    pub overall_confidence: f64,
    pub metrics: PatternMetrics,
}
