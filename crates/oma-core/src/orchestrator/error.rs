//! Submission failures. `Display` is the message shown to the user.

use thiserror::Error;

use crate::fetch::RemoteError;
use crate::url_model::ResolveError;

/// Why a single submission produced no report. None of these are fatal.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{}", ResolveError::NotRecognized)]
    NotRecognized,
    /// Beatmapset link without a `#mode/<difficulty>` suffix.
    #[error("beatmapset link {set_id:?} does not point at a difficulty; copy the link of a specific difficulty")]
    MissingDifficulty { set_id: String },
    /// Resolved id is not a positive integer.
    #[error("{0:?} is not a valid beatmap id")]
    InvalidIdentifier(String),
    #[error("lookup failed: {0}")]
    Remote(#[from] RemoteError),
}

impl From<ResolveError> for SubmitError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::NotRecognized => SubmitError::NotRecognized,
        }
    }
}
