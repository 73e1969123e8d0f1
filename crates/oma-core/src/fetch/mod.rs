//! Lookups against the analysis backend.
//!
//! The orchestrator only depends on [`BeatmapSource`]; [`HttpSource`] is the
//! libcurl implementation used by the CLI.

mod error;
mod http;
mod wire;

pub use error::RemoteError;
pub use http::HttpSource;
pub use wire::DecodeError;

use crate::model::{AnalysisRequest, AnalysisVariant, BeatmapMetadata};

/// The two remote read operations a submission needs.
pub trait BeatmapSource {
    /// `GET /api/beatmaps/{id}/details`
    fn fetch_metadata(&self, beatmap_id: u32) -> Result<BeatmapMetadata, RemoteError>;

    /// `GET /api/beatmaps/{id}/analyze/{kind}`. Single-kind requests yield one variant.
    fn fetch_analysis(
        &self,
        beatmap_id: u32,
        request: AnalysisRequest,
    ) -> Result<Vec<AnalysisVariant>, RemoteError>;
}
