//! `oma resolve <url>` – show the parsed reference and the beatmap it targets.

use anyhow::Result;
use oma_core::orchestrator::{coerce_beatmap_id, target_beatmap_id};
use oma_core::url_model::{self, ParsedReference};

pub fn run_resolve(url: &str, json: bool) -> Result<()> {
    let reference = url_model::resolve(url)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&reference)?);
        return Ok(());
    }
    println!("{}", describe(&reference));
    match target_beatmap_id(&reference).and_then(coerce_beatmap_id) {
        Ok(id) => println!("analyzes beatmap {id} ({})", url_model::beatmap_link(id)),
        Err(err) => println!("cannot analyze: {err}"),
    }
    Ok(())
}

pub(crate) fn describe(reference: &ParsedReference) -> String {
    match reference {
        ParsedReference::DirectBeatmap { beatmap_id, .. } => {
            format!("direct beatmap link: id {beatmap_id}")
        }
        ParsedReference::BeatmapSetReference {
            set_id,
            game_mode,
            difficulty_id,
            ..
        } => format!(
            "beatmapset link: set {set_id:?}, mode {}, difficulty {}",
            game_mode.as_deref().unwrap_or("-"),
            difficulty_id.as_deref().unwrap_or("-")
        ),
    }
}
