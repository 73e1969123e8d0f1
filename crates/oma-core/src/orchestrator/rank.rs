//! Confidence ranking of analysis variants.

use serde::Serialize;

use crate::model::AnalysisVariant;

/// Analysis variants of one beatmap, highest confidence first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnalysisBundle(Vec<AnalysisVariant>);

impl AnalysisBundle {
    /// The most confident classification, if any.
    pub fn primary(&self) -> Option<&AnalysisVariant> {
        self.0.first()
    }

    pub fn as_slice(&self) -> &[AnalysisVariant] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnalysisVariant> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a AnalysisBundle {
    type Item = &'a AnalysisVariant;
    type IntoIter = std::slice::Iter<'a, AnalysisVariant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Orders `variants` by descending `overall_confidence`.
///
/// Stable: equal confidences keep their input order, so ranking an already
/// ranked bundle returns it unchanged. The input is left untouched.
pub fn rank_by_confidence(variants: &[AnalysisVariant]) -> AnalysisBundle {
    let mut ranked = variants.to_vec();
    ranked.sort_by(|a, b| sort_key(b.overall_confidence).total_cmp(&sort_key(a.overall_confidence)));
    AnalysisBundle(ranked)
}

// NaN ranks last; -0.0 ties with 0.0.
fn sort_key(confidence: f64) -> f64 {
    if confidence.is_nan() {
        f64::NEG_INFINITY
    } else {
        confidence + 0.0
    }
}
