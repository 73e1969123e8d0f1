//! Orchestrator plus result slot: what a caller that displays results holds.

use std::sync::Arc;

use super::slot::ResultSlot;
use super::{AnalysisReport, Orchestrator, SubmitError};
use crate::fetch::BeatmapSource;

/// What happened to one submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Became the displayed report.
    Committed(Arc<AnalysisReport>),
    /// Succeeded, but a newer submission started meanwhile; result dropped.
    Stale,
    /// Failed; the previously committed report is untouched.
    Failed(SubmitError),
}

pub struct Session<S> {
    orchestrator: Orchestrator<S>,
    slot: ResultSlot<AnalysisReport>,
}

impl<S: BeatmapSource + Sync> Session<S> {
    pub fn new(orchestrator: Orchestrator<S>) -> Self {
        Self {
            orchestrator,
            slot: ResultSlot::new(),
        }
    }

    /// Run one submission and commit it if it is still the latest.
    pub fn submit(&self, raw_input: &str) -> SubmitOutcome {
        let token = self.slot.begin();
        match self.orchestrator.submit(raw_input) {
            Ok(report) => match self.slot.commit(token, report) {
                Some(report) => SubmitOutcome::Committed(report),
                None => {
                    tracing::debug!(?token, "discarding result of superseded submission");
                    SubmitOutcome::Stale
                }
            },
            Err(err) => {
                tracing::warn!(url = raw_input, "submission failed: {}", err);
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// The report currently on display, if any submission has committed.
    pub fn current(&self) -> Option<Arc<AnalysisReport>> {
        self.slot.current()
    }
}
