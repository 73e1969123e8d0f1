//! Plain-text rendering of an analysis report.

use oma_core::model::{AnalysisVariant, PatternMetrics};
use oma_core::orchestrator::AnalysisReport;
use oma_core::url_model;
use std::fmt::Write;

pub fn format_report(report: &AnalysisReport) -> String {
    let meta = &report.metadata;
    let stats = &meta.statistics;
    let mut out = String::new();

    let _ = writeln!(out, "{} - {} [{}]", meta.artist, meta.title, meta.version);
    let mapper_link = match meta.creator_id {
        Some(id) => url_model::user_profile_link(id),
        None => url_model::user_profile_link(&meta.creator),
    };
    let _ = writeln!(out, "mapped by {} ({})", meta.creator, mapper_link);
    let _ = writeln!(
        out,
        "more by {}: {}",
        meta.artist,
        url_model::artist_search_link(&meta.artist)
    );
    let _ = writeln!(out, "{}", report.beatmap_link());
    let _ = writeln!(out, "cover: {}", report.cover_image_url());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  AR {}  OD {}  HP {}  CS {}  BPM {:.0}  Stars {:.2}",
        stats.ar, stats.od, stats.hp, stats.cs, stats.bpm, stats.star_rating
    );
    let _ = writeln!(out);

    match report.analyses.primary() {
        Some(primary) => {
            let _ = writeln!(
                out,
                "Primary: {} ({})",
                capitalize(primary.kind.as_str()),
                percent(primary.overall_confidence)
            );
        }
        None => {
            let _ = writeln!(out, "Primary: none (backend returned no analyses)");
        }
    }
    for variant in &report.analyses {
        let _ = writeln!(out, "  {}", variant_line(variant));
    }
    out
}

fn variant_line(variant: &AnalysisVariant) -> String {
    let mut line = format!(
        "{:<8} {:>6}",
        variant.kind.as_str(),
        percent(variant.overall_confidence)
    );
    for (label, value) in metric_fields(&variant.metrics) {
        let _ = write!(line, "  {label} {value}");
    }
    line
}

fn metric_fields(m: &PatternMetrics) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();
    if let Some(n) = m.short_count {
        fields.push(("short", n.to_string()));
    }
    if let Some(n) = m.medium_count {
        fields.push(("medium", n.to_string()));
    }
    if let Some(n) = m.long_count {
        fields.push(("long", n.to_string()));
    }
    if let Some(n) = m.max_length {
        fields.push(("longest", format!("{n} notes")));
    }
    if let Some(d) = m.peak_density {
        fields.push(("peak density", format!("{d:.2}")));
    }
    if let Some(c) = m.bpm_consistency {
        fields.push(("bpm consistency", percent(c)));
    }
    fields
}

fn percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
