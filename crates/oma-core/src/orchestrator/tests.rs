use super::*;
use crate::model::{AnalysisKind, BeatmapStatistics, PatternMetrics};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

fn metadata(beatmap_id: u32) -> BeatmapMetadata {
    BeatmapMetadata {
        title: format!("map {beatmap_id}"),
        artist: "xi".to_string(),
        creator: "Nakagawa-Kanon".to_string(),
        creator_id: Some(87065),
        version: "FOUR DIMENSIONS".to_string(),
        set_id: 39804,
        statistics: BeatmapStatistics {
            ar: 9.0,
            od: 8.0,
            hp: 6.0,
            cs: 4.0,
            bpm: 222.22,
            star_rating: 7.07,
        },
    }
}

fn variant(kind: &str, confidence: f64) -> AnalysisVariant {
    AnalysisVariant {
        kind: AnalysisKind::from(kind),
        overall_confidence: confidence,
        metrics: PatternMetrics::default(),
    }
}

fn status(code: u32) -> RemoteError {
    RemoteError::Status {
        url: "fake://backend".to_string(),
        code,
    }
}

/// Canned source that counts calls and remembers requested ids.
#[derive(Default)]
struct FakeSource {
    metadata_status: Option<u32>,
    analysis_status: Option<u32>,
    variants: Vec<AnalysisVariant>,
    metadata_calls: AtomicUsize,
    analysis_calls: AtomicUsize,
    requested: Mutex<Vec<(u32, AnalysisRequest)>>,
}

impl FakeSource {
    fn with_variants(variants: Vec<AnalysisVariant>) -> Self {
        Self {
            variants,
            ..Self::default()
        }
    }
}

impl BeatmapSource for FakeSource {
    fn fetch_metadata(&self, beatmap_id: u32) -> Result<BeatmapMetadata, RemoteError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        match self.metadata_status {
            Some(code) => Err(status(code)),
            None => Ok(metadata(beatmap_id)),
        }
    }

    fn fetch_analysis(
        &self,
        beatmap_id: u32,
        request: AnalysisRequest,
    ) -> Result<Vec<AnalysisVariant>, RemoteError> {
        self.analysis_calls.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().unwrap().push((beatmap_id, request));
        match self.analysis_status {
            Some(code) => Err(status(code)),
            None => Ok(self.variants.clone()),
        }
    }
}

fn two_variants() -> Vec<AnalysisVariant> {
    vec![variant("jump", 0.31), variant("stream", 0.87)]
}

#[test]
fn direct_link_produces_ranked_report() {
    let orch = Orchestrator::new(FakeSource::with_variants(two_variants()));
    let report = orch.submit("https://osu.ppy.sh/b/129891").unwrap();

    assert_eq!(report.beatmap_id, 129891);
    assert_eq!(report.metadata.title, "map 129891");
    let kinds: Vec<_> = report.analyses.iter().map(|v| v.kind.as_str()).collect();
    assert_eq!(kinds, ["stream", "jump"]);
    assert_eq!(report.beatmap_link(), "https://osu.ppy.sh/b/129891");
    assert_eq!(
        report.cover_image_url(),
        "https://assets.ppy.sh/beatmaps/39804/covers/cover.jpg"
    );
    assert_eq!(
        *orch.source().requested.lock().unwrap(),
        vec![(129891, AnalysisRequest::All)]
    );
}

#[test]
fn beatmapset_link_uses_difficulty_id() {
    let orch = Orchestrator::new(FakeSource::with_variants(two_variants()));
    let report = orch
        .submit("https://osu.ppy.sh/beatmapsets/39804#osu/129891")
        .unwrap();
    assert_eq!(report.beatmap_id, 129891);
}

#[test]
fn beatmapset_without_difficulty_is_missing_difficulty() {
    let orch = Orchestrator::new(FakeSource::default());
    for url in [
        "https://osu.ppy.sh/beatmapsets/39804",
        "https://osu.ppy.sh/beatmapsets/39804#osu",
    ] {
        match orch.submit(url) {
            Err(SubmitError::MissingDifficulty { set_id }) => assert_eq!(set_id, "39804"),
            other => panic!("expected MissingDifficulty for {url}, got {:?}", other),
        }
    }
    assert_eq!(orch.source().metadata_calls.load(Ordering::SeqCst), 0);
    assert_eq!(orch.source().analysis_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn unrecognized_url() {
    let orch = Orchestrator::new(FakeSource::default());
    assert!(matches!(
        orch.submit("https://example.com/b/1"),
        Err(SubmitError::NotRecognized)
    ));
}

#[test]
fn invalid_identifiers() {
    let orch = Orchestrator::new(FakeSource::default());
    for url in [
        "https://osu.ppy.sh/b/abc",
        "https://osu.ppy.sh/b/0",
        "https://osu.ppy.sh/b/-5",
        "https://osu.ppy.sh/b/1.5",
        "https://osu.ppy.sh/b/99999999999",
        "https://osu.ppy.sh/beatmapsets/1#osu/2/3",
    ] {
        assert!(
            matches!(orch.submit(url), Err(SubmitError::InvalidIdentifier(_))),
            "{url}"
        );
    }
    assert_eq!(orch.source().metadata_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn coerce_accepts_positive_integers() {
    assert_eq!(coerce_beatmap_id("1").unwrap(), 1);
    assert_eq!(coerce_beatmap_id("4294967295").unwrap(), u32::MAX);
    assert!(coerce_beatmap_id("").is_err());
    assert!(coerce_beatmap_id(" 1").is_err());
}

#[test]
fn metadata_failure_fails_submission() {
    for mode in [FetchMode::Concurrent, FetchMode::Sequential] {
        let source = FakeSource {
            metadata_status: Some(500),
            ..FakeSource::with_variants(two_variants())
        };
        let orch = Orchestrator::new(source).with_fetch_mode(mode);
        match orch.submit("https://osu.ppy.sh/b/1") {
            Err(SubmitError::Remote(RemoteError::Status { code, .. })) => assert_eq!(code, 500),
            other => panic!("expected Remote error in {:?}, got {:?}", mode, other),
        }
    }
}

#[test]
fn sequential_mode_skips_analysis_after_metadata_failure() {
    let source = FakeSource {
        metadata_status: Some(404),
        ..FakeSource::default()
    };
    let orch = Orchestrator::new(source).with_fetch_mode(FetchMode::Sequential);
    assert!(orch.submit("https://osu.ppy.sh/b/1").is_err());
    assert_eq!(orch.source().metadata_calls.load(Ordering::SeqCst), 1);
    assert_eq!(orch.source().analysis_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn analysis_failure_fails_submission() {
    let source = FakeSource {
        analysis_status: Some(502),
        ..FakeSource::default()
    };
    let orch = Orchestrator::new(source);
    assert!(matches!(
        orch.submit("https://osu.ppy.sh/b/1"),
        Err(SubmitError::Remote(RemoteError::Status { code: 502, .. }))
    ));
    assert_eq!(orch.source().metadata_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn session_keeps_last_good_report_on_failure() {
    let session = Session::new(Orchestrator::new(FakeSource::with_variants(two_variants())));
    let first = match session.submit("https://osu.ppy.sh/b/7") {
        SubmitOutcome::Committed(report) => report,
        other => panic!("expected Committed, got {:?}", other),
    };

    assert!(matches!(
        session.submit("https://osu.ppy.sh/beatmapsets/1"),
        SubmitOutcome::Failed(SubmitError::MissingDifficulty { .. })
    ));
    assert!(matches!(
        session.submit("not a url"),
        SubmitOutcome::Failed(SubmitError::NotRecognized)
    ));
    assert_eq!(session.current(), Some(first));
}

#[test]
fn session_remote_failure_keeps_last_good_report() {
    struct FlakySource {
        fail_id: u32,
    }
    impl BeatmapSource for FlakySource {
        fn fetch_metadata(&self, beatmap_id: u32) -> Result<BeatmapMetadata, RemoteError> {
            if beatmap_id == self.fail_id {
                Err(status(503))
            } else {
                Ok(metadata(beatmap_id))
            }
        }
        fn fetch_analysis(
            &self,
            _beatmap_id: u32,
            _request: AnalysisRequest,
        ) -> Result<Vec<AnalysisVariant>, RemoteError> {
            Ok(two_variants())
        }
    }

    let session = Session::new(Orchestrator::new(FlakySource { fail_id: 2 }));
    assert!(matches!(
        session.submit("https://osu.ppy.sh/b/1"),
        SubmitOutcome::Committed(_)
    ));
    assert!(matches!(
        session.submit("https://osu.ppy.sh/b/2"),
        SubmitOutcome::Failed(SubmitError::Remote(_))
    ));
    assert_eq!(session.current().unwrap().beatmap_id, 1);
}

/// Holds metadata lookups for `gated_id` until released.
struct GatedSource {
    gated_id: u32,
    entered: Mutex<mpsc::Sender<u32>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl BeatmapSource for GatedSource {
    fn fetch_metadata(&self, beatmap_id: u32) -> Result<BeatmapMetadata, RemoteError> {
        if beatmap_id == self.gated_id {
            self.entered.lock().unwrap().send(beatmap_id).unwrap();
            self.release.lock().unwrap().recv().unwrap();
        }
        Ok(metadata(beatmap_id))
    }

    fn fetch_analysis(
        &self,
        _beatmap_id: u32,
        _request: AnalysisRequest,
    ) -> Result<Vec<AnalysisVariant>, RemoteError> {
        Ok(vec![variant("stream", 0.5)])
    }
}

#[test]
fn late_result_of_older_submission_is_discarded() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let session = Arc::new(Session::new(Orchestrator::new(GatedSource {
        gated_id: 1,
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
    })));

    // Submission A starts and blocks inside its metadata lookup.
    let a = {
        let session = Arc::clone(&session);
        thread::spawn(move || session.submit("https://osu.ppy.sh/b/1"))
    };
    assert_eq!(entered_rx.recv().unwrap(), 1);

    // Submission B starts after A and completes first.
    match session.submit("https://osu.ppy.sh/b/2") {
        SubmitOutcome::Committed(report) => assert_eq!(report.beatmap_id, 2),
        other => panic!("expected B to commit, got {:?}", other),
    }

    // A completes last and must not overwrite B.
    release_tx.send(()).unwrap();
    assert!(matches!(a.join().unwrap(), SubmitOutcome::Stale));
    assert_eq!(session.current().unwrap().beatmap_id, 2);
}
