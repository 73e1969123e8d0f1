//! JSON bodies of the backend responses.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{AnalysisKind, AnalysisRequest, AnalysisVariant, BeatmapMetadata, PatternMetrics};

/// `{ "analysis_type": "...", "analysis": { ... } }`
#[derive(Debug, Deserialize)]
struct AnalysisResult {
    analysis_type: String,
    analysis: Value,
}

/// A 2xx body that is not the JSON shape the backend is expected to send.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON body")]
    Json(#[from] serde_json::Error),
    #[error("{kind} analysis is not an object")]
    NotAnObject { kind: AnalysisKind },
    #[error("{kind} analysis has no overall_confidence")]
    MissingConfidence { kind: AnalysisKind },
    #[error("{kind} analysis has a non-finite confidence")]
    NonFiniteConfidence { kind: AnalysisKind },
}

pub(crate) fn decode_details(body: &[u8]) -> Result<BeatmapMetadata, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}

/// `all` answers with a list, a single kind with one object.
pub(crate) fn decode_analyses(
    body: &[u8],
    request: AnalysisRequest,
) -> Result<Vec<AnalysisVariant>, DecodeError> {
    let results: Vec<AnalysisResult> = match request {
        AnalysisRequest::All => serde_json::from_slice(body)?,
        AnalysisRequest::Stream | AnalysisRequest::Jump => vec![serde_json::from_slice(body)?],
    };
    results.into_iter().map(into_variant).collect()
}

fn into_variant(result: AnalysisResult) -> Result<AnalysisVariant, DecodeError> {
    let kind = AnalysisKind::from(result.analysis_type.as_str());
    let Some(fields) = result.analysis.as_object() else {
        return Err(DecodeError::NotAnObject { kind });
    };

    let Some(confidence) = fields.get("overall_confidence").and_then(Value::as_f64) else {
        return Err(DecodeError::MissingConfidence { kind });
    };
    if !confidence.is_finite() {
        return Err(DecodeError::NonFiniteConfidence { kind });
    }

    // Metric keys are named after the kind: short_streams, max_jump_length, ...
    let noun = kind.as_str();
    let metrics = PatternMetrics {
        short_count: count(fields, &format!("short_{noun}s")),
        medium_count: count(fields, &format!("medium_{noun}s")),
        long_count: count(fields, &format!("long_{noun}s")),
        max_length: count(fields, &format!("max_{noun}_length")),
        peak_density: number(fields, &format!("peak_{noun}_density"))
            .or_else(|| number(fields, "peak_density")),
        bpm_consistency: number(fields, "bpm_consistency"),
    };

    Ok(AnalysisVariant {
        kind,
        overall_confidence: confidence.clamp(0.0, 1.0),
        metrics,
    })
}

fn count(fields: &Map<String, Value>, key: &str) -> Option<u32> {
    fields
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

fn number(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    fields.get(key).and_then(Value::as_f64)
}
