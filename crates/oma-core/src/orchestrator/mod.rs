//! Submission pipeline: resolve the pasted URL, look up metadata and
//! analyses, rank the analyses, and hand back one immutable report.
//!
//! A submission is all-or-nothing. Either lookup failing fails the whole
//! submission and nothing partial is returned. There is no retry.

mod error;
mod rank;
mod session;
mod slot;

pub use error::SubmitError;
pub use rank::{rank_by_confidence, AnalysisBundle};
pub use session::{Session, SubmitOutcome};
pub use slot::{ResultSlot, SubmissionToken};

use serde::Serialize;

use crate::config::FetchMode;
use crate::fetch::{BeatmapSource, RemoteError};
use crate::model::{AnalysisRequest, AnalysisVariant, BeatmapMetadata};
use crate::url_model::{self, ParsedReference};

/// Result of one successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub beatmap_id: u32,
    pub metadata: BeatmapMetadata,
    pub analyses: AnalysisBundle,
}

impl AnalysisReport {
    pub fn beatmap_link(&self) -> String {
        url_model::beatmap_link(self.beatmap_id)
    }

    pub fn cover_image_url(&self) -> String {
        url_model::cover_image_url(self.metadata.set_id)
    }
}

/// Picks the beatmap (difficulty) id a reference points at.
///
/// A beatmapset link only identifies a beatmap when it carries a difficulty id.
pub fn target_beatmap_id(reference: &ParsedReference) -> Result<&str, SubmitError> {
    match reference {
        ParsedReference::DirectBeatmap { beatmap_id, .. } => Ok(beatmap_id),
        ParsedReference::BeatmapSetReference {
            difficulty_id: Some(id),
            ..
        } => Ok(id),
        ParsedReference::BeatmapSetReference {
            set_id,
            difficulty_id: None,
            ..
        } => Err(SubmitError::MissingDifficulty {
            set_id: set_id.clone(),
        }),
    }
}

/// Parses a resolved id as a positive integer.
pub fn coerce_beatmap_id(text: &str) -> Result<u32, SubmitError> {
    match text.parse::<u32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(SubmitError::InvalidIdentifier(text.to_string())),
    }
}

/// Runs submissions against a [`BeatmapSource`].
pub struct Orchestrator<S> {
    source: S,
    fetch_mode: FetchMode,
}

impl<S: BeatmapSource + Sync> Orchestrator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            fetch_mode: FetchMode::default(),
        }
    }

    pub fn with_fetch_mode(mut self, fetch_mode: FetchMode) -> Self {
        self.fetch_mode = fetch_mode;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve `raw_input`, fetch metadata and all analyses, and rank them.
    pub fn submit(&self, raw_input: &str) -> Result<AnalysisReport, SubmitError> {
        let reference = url_model::resolve(raw_input)?;
        let beatmap_id = coerce_beatmap_id(target_beatmap_id(&reference)?)?;
        tracing::debug!(beatmap_id, url = raw_input, "submission resolved");

        let (metadata, variants) = self.fetch_both(beatmap_id)?;
        let analyses = rank_by_confidence(&variants);

        tracing::info!(
            beatmap_id,
            title = %metadata.title,
            primary = analyses.primary().map(|v| v.kind.as_str()).unwrap_or("-"),
            "analysis ready"
        );
        Ok(AnalysisReport {
            beatmap_id,
            metadata,
            analyses,
        })
    }

    fn fetch_both(
        &self,
        beatmap_id: u32,
    ) -> Result<(BeatmapMetadata, Vec<AnalysisVariant>), RemoteError> {
        match self.fetch_mode {
            FetchMode::Sequential => {
                let metadata = self.source.fetch_metadata(beatmap_id)?;
                let variants = self.source.fetch_analysis(beatmap_id, AnalysisRequest::All)?;
                Ok((metadata, variants))
            }
            FetchMode::Concurrent => std::thread::scope(|scope| {
                let analysis =
                    scope.spawn(|| self.source.fetch_analysis(beatmap_id, AnalysisRequest::All));
                let metadata = self.source.fetch_metadata(beatmap_id);
                let variants = analysis
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
                Ok((metadata?, variants?))
            }),
        }
    }
}

#[cfg(test)]
mod tests;
