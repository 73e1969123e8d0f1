//! `oma interactive` – analyze URLs read from stdin.
//!
//! Each line starts a submission right away; earlier ones keep running. A
//! result is shown only if no newer line was submitted meanwhile, and
//! failures leave the last shown report in place.

use anyhow::{Context, Result};
use oma_core::config::OmaConfig;
use oma_core::fetch::{BeatmapSource, HttpSource};
use oma_core::orchestrator::{Orchestrator, Session, SubmitOutcome};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use crate::cli::render;

pub async fn run_interactive(cfg: &OmaConfig) -> Result<()> {
    let source = HttpSource::from_config(cfg)?;
    let session = Arc::new(Session::new(
        Orchestrator::new(source).with_fetch_mode(cfg.fetch_mode),
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut inflight = JoinSet::new();
    let mut stdin_open = true;

    eprintln!("Paste an osu! beatmap URL per line (Ctrl-D to quit).");
    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line.context("reading stdin")? {
                    Some(line) => {
                        let input = line.trim().to_string();
                        if !input.is_empty() {
                            let session = Arc::clone(&session);
                            inflight.spawn_blocking(move || {
                                let outcome = session.submit(&input);
                                (input, outcome)
                            });
                        }
                    }
                    None => stdin_open = false,
                }
            }
            Some(joined) = inflight.join_next(), if !inflight.is_empty() => {
                let (input, outcome) = joined.context("submission task join")?;
                report_outcome(&session, &input, outcome, &mut io::stdout(), &mut io::stderr())
                    .context("writing result")?;
            }
            else => break,
        }
    }
    Ok(())
}

fn report_outcome<S: BeatmapSource + Sync>(
    session: &Session<S>,
    input: &str,
    outcome: SubmitOutcome,
    out: &mut impl Write,
    err_out: &mut impl Write,
) -> io::Result<()> {
    match outcome {
        SubmitOutcome::Committed(report) => write!(out, "{}", render::format_report(&report)),
        SubmitOutcome::Stale => {
            writeln!(out, "{input}: superseded by a newer submission, result discarded")
        }
        SubmitOutcome::Failed(err) => {
            writeln!(err_out, "{input}: {err}")?;
            if let Some(current) = session.current() {
                writeln!(err_out, "(still showing beatmap {})", current.beatmap_id)?;
            }
            Ok(())
        }
    }
}
