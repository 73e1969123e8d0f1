//! Public links for a resolved beatmap.

use std::fmt::Display;

use super::OSU_ORIGIN;

const ASSETS_ORIGIN: &str = "https://assets.ppy.sh/";

/// Short link to a single difficulty, e.g. `https://osu.ppy.sh/b/75`.
pub fn beatmap_link(beatmap_id: u32) -> String {
    format!("{OSU_ORIGIN}b/{beatmap_id}")
}

/// Cover image of a beatmapset.
pub fn cover_image_url(set_id: u32) -> String {
    format!("{ASSETS_ORIGIN}beatmaps/{set_id}/covers/cover.jpg")
}

/// Beatmapset search for every map by `artist` (exact match).
pub fn artist_search_link(artist: &str) -> String {
    let artist: String = url::form_urlencoded::byte_serialize(artist.as_bytes()).collect();
    format!("{OSU_ORIGIN}beatmapsets?q=artist=\"\"{artist}\"\"")
}

/// Profile page; the website accepts either a numeric id or a username.
pub fn user_profile_link(user: impl Display) -> String {
    format!("{OSU_ORIGIN}users/{user}")
}
