use std::sync::Arc;

use super::domain::ScoresByCategory;
use super::taxonomy::{Axis, AxisRecommendations, Taxonomy};

/// Axis keywords in priority order. A category name containing several keywords is
/// attached to the first one listed here.
pub const AXIS_KEYWORDS: [&str; 3] = ["Marketing", "Opérationnel", "Stratégique"];

/// Category scores at or below this ceiling get the low tier.
const LOW_TIER_CEILING: f64 = 2.5;
/// Category scores at or below this ceiling (and above the low one) get the middle tier.
const MID_TIER_CEILING: f64 = 3.5;

/// Separates a category's domain from its sub-domain, e.g. `"Diagnostic Opérationnel - Logistique"`.
const SUBDOMAIN_SEPARATOR: &str = " - ";

/// Turns category scores into `"<category>: <text>"` recommendations.
#[derive(Debug, Clone)]
pub struct RecommendationGenerator {
    taxonomy: Arc<Taxonomy>,
}

impl RecommendationGenerator {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// One recommendation per category that maps to an axis and, for summary axes, to a
    /// candidate text. Categories that do not are skipped.
    pub fn generate(&self, scores: &ScoresByCategory) -> Vec<String> {
        scores
            .iter()
            .filter_map(|(category, score)| self.recommend(category, score))
            .collect()
    }

    pub fn recommend(&self, category: &str, score: f64) -> Option<String> {
        let axis = self.axis_for(category)?;
        let text = match &axis.recommendations {
            AxisRecommendations::Tiered(tiers) => tiers[tier_index(score)].as_str(),
            AxisRecommendations::Summary(candidates) => {
                let keyword = subdomain_keyword(category)?;
                pick_summary(candidates, &keyword)?
            }
        };
        Some(format!("{category}: {text}"))
    }

    /// Picks the first keyword (in priority order) the category name contains, then the
    /// first axis whose name carries that same keyword.
    pub fn axis_for(&self, category: &str) -> Option<&Axis> {
        let keyword = AXIS_KEYWORDS
            .iter()
            .find(|keyword| category.contains(*keyword))?;
        self.taxonomy
            .axes()
            .iter()
            .find(|axis| axis.name.contains(keyword))
    }
}

pub(crate) fn tier_index(score: f64) -> usize {
    if score <= LOW_TIER_CEILING {
        0
    } else if score <= MID_TIER_CEILING {
        1
    } else {
        2
    }
}

/// Lower-cased second segment of the category name, if any.
fn subdomain_keyword(category: &str) -> Option<String> {
    let keyword = category.split(SUBDOMAIN_SEPARATOR).nth(1)?;
    if keyword.is_empty() {
        return None;
    }
    Some(keyword.to_lowercase())
}

/// First candidate whose lower-cased text contains `keyword`.
fn pick_summary<'a>(candidates: &'a [String], keyword: &str) -> Option<&'a str> {
    candidates
        .iter()
        .find(|candidate| candidate.to_lowercase().contains(keyword))
        .map(String::as_str)
}
