use std::sync::Arc;

use super::taxonomy::{ScaleBand, Taxonomy};

/// Label returned for scores that fall outside every interpretation band.
pub const OUT_OF_RANGE_LABEL: &str = "Hors échelle";

/// Maps scores onto the taxonomy's interpretation bands.
#[derive(Debug, Clone)]
pub struct InterpretationClassifier {
    taxonomy: Arc<Taxonomy>,
}

impl InterpretationClassifier {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn bands(&self) -> &[ScaleBand] {
        self.taxonomy.scale_bands()
    }

    /// First band, in declared order, whose closed range holds `score`. A score sitting on
    /// an endpoint shared by two bands belongs to the lower one.
    pub fn band_for(&self, score: f64) -> Option<(usize, &ScaleBand)> {
        self.taxonomy
            .scale_bands()
            .iter()
            .enumerate()
            .find(|(_, band)| band.contains(score))
    }

    /// Never fails: unmatched scores (including NaN) get [`OUT_OF_RANGE_LABEL`].
    pub fn classify(&self, score: f64) -> &str {
        self.band_for(score)
            .map(|(_, band)| band.label.as_str())
            .unwrap_or(OUT_OF_RANGE_LABEL)
    }
}
