use std::collections::BTreeMap;

use serde::Deserialize;

/// Wire shape of the taxonomy reference document.
#[derive(Debug, Deserialize)]
pub(super) struct TaxonomyDocument {
    #[serde(rename = "Questions")]
    pub(super) questions: Vec<BTreeMap<String, Vec<QuestionEntry>>>,
    #[serde(rename = "Scales")]
    pub(super) scales: ScalesEntry,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuestionEntry {
    pub(super) id: String,
    pub(super) question: String,
    #[serde(default)]
    pub(super) answer: String,
    #[serde(default)]
    pub(super) weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ScalesEntry {
    #[serde(rename = "GeneralInterpretation")]
    pub(super) general_interpretation: Vec<BandEntry>,
    #[serde(rename = "Axes", default)]
    pub(super) axes: BTreeMap<String, AxisEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BandEntry {
    pub(super) range: String,
    pub(super) interpretation: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AxisEntry {
    #[serde(default)]
    pub(super) recommendations: Option<Vec<String>>,
    #[serde(default)]
    pub(super) recommendations_summary: Option<Vec<String>>,
}

/// Splits a `"min - max"` range string. The separator includes the surrounding spaces so
/// that negative bounds are not mistaken for it.
pub(super) fn parse_range(range: &str) -> Option<(f64, f64)> {
    let (min, max) = range.split_once(" - ")?;
    let min = min.trim().parse::<f64>().ok()?;
    let max = max.trim().parse::<f64>().ok()?;
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}
