//! osu! website URL modeling.
//!
//! Resolves the URL shapes users paste from the osu! website into a
//! [`ParsedReference`] using fixed anchor search (no general URL parser), and
//! builds the public links shown next to an analysis.

mod beatmapset;
mod links;

pub use links::{artist_search_link, beatmap_link, cover_image_url, user_profile_link};

use serde::Serialize;
use thiserror::Error;

/// Origin every accepted URL must start with. Matching is case-sensitive.
pub const OSU_ORIGIN: &str = "https://osu.ppy.sh/";

/// Path segment (with its trailing slash) that introduces a beatmapset link.
const BEATMAPSETS_SEGMENT: &str = "beatmapsets/";

/// Input did not match any supported URL shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(
        "not a recognized osu! beatmap URL (expected {origin}b/<id> or {origin}beatmapsets/<set>#<mode>/<id>)",
        origin = OSU_ORIGIN
    )]
    NotRecognized,
}

/// A successfully resolved beatmap URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedReference {
    /// `https://osu.ppy.sh/b/<beatmap_id>`
    DirectBeatmap { raw_url: String, beatmap_id: String },
    /// `https://osu.ppy.sh/beatmapsets/<set_id>[#<game_mode>[/<difficulty_id>]]`
    BeatmapSetReference {
        raw_url: String,
        set_id: String,
        game_mode: Option<String>,
        difficulty_id: Option<String>,
    },
}

/// Resolves a pasted URL into a [`ParsedReference`].
///
/// Identifiers are returned verbatim; numeric coercion is left to the caller.
/// Never panics and performs no I/O.
///
/// # Examples
///
/// - `https://osu.ppy.sh/b/123` → `DirectBeatmap { beatmap_id: "123" }`
/// - `https://osu.ppy.sh/beatmapsets/456#osu/789` → `BeatmapSetReference { set_id: "456", game_mode: Some("osu"), difficulty_id: Some("789") }`
pub fn resolve(input: &str) -> Result<ParsedReference, ResolveError> {
    let path = input
        .strip_prefix(OSU_ORIGIN)
        .ok_or(ResolveError::NotRecognized)?;

    // Only `b/...` and `beatmapsets/...` are supported; other `b*` paths
    // (e.g. `beatmaps/`) are rejected below.
    if !path.starts_with('b') {
        return Err(ResolveError::NotRecognized);
    }

    if let Some(beatmap_id) = path.strip_prefix("b/") {
        if beatmap_id.is_empty() {
            return Err(ResolveError::NotRecognized);
        }
        return Ok(ParsedReference::DirectBeatmap {
            raw_url: input.to_string(),
            beatmap_id: beatmap_id.to_string(),
        });
    }

    let remainder = path
        .strip_prefix(BEATMAPSETS_SEGMENT)
        .ok_or(ResolveError::NotRecognized)?;
    let parts = beatmapset::split_remainder(remainder)?;

    Ok(ParsedReference::BeatmapSetReference {
        raw_url: input.to_string(),
        set_id: parts.set_id.to_string(),
        game_mode: parts.game_mode.map(str::to_string),
        difficulty_id: parts.difficulty_id.map(str::to_string),
    })
}
