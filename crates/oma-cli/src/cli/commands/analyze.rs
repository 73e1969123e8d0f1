//! `oma analyze <url>` – one submission, printed as text or JSON.

use anyhow::{Context, Result};
use oma_core::config::OmaConfig;
use oma_core::fetch::HttpSource;
use oma_core::orchestrator::Orchestrator;

use crate::cli::render;

pub async fn run_analyze(cfg: &OmaConfig, url: &str, json: bool) -> Result<()> {
    let source = HttpSource::from_config(cfg)?;
    let orchestrator = Orchestrator::new(source).with_fetch_mode(cfg.fetch_mode);

    let report = tokio::task::spawn_blocking({
        let url = url.to_string();
        move || orchestrator.submit(&url)
    })
    .await
    .context("analyze task join")??;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::format_report(&report));
    }
    Ok(())
}
