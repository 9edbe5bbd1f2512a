//! Aggregations over stored assessment results for dashboards.
//!
//! These rollups only read results; they never feed back into per-record scoring.

mod overview;
mod performance;
mod ranking;
mod recommendations;
pub mod views;

pub use overview::{monthly_growth, recent_assessments, results_overview};
pub use performance::category_performance;
pub use ranking::cooperatives_by_score;
pub use recommendations::recommendation_frequency;
pub use views::{
    BandCount, CategoryPerformance, CategoryPerformanceReport, InterpretationCount, MonthlyCount,
    RecentAssessment, RecommendationFrequency, RecommendationReport, ResultsOverview,
};

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use crate::assessment::{
        AssessmentId, AssessmentRecord, AssessmentResult, CooperativeId, InterpretationClassifier,
        ScoresByCategory, Taxonomy,
    };

    pub(crate) fn classifier() -> InterpretationClassifier {
        InterpretationClassifier::new(Arc::new(
            Taxonomy::standard().expect("standard taxonomy"),
        ))
    }

    pub(crate) fn result_with(scores: &[(&str, f64)], overall_score: f64) -> AssessmentResult {
        AssessmentResult {
            cooperative_id: CooperativeId(1),
            answers: Vec::new(),
            overall_score,
            scores_by_category: scores
                .iter()
                .map(|(category, score)| (category.to_string(), *score))
                .collect::<ScoresByCategory>(),
            interpretation: classifier().classify(overall_score).to_string(),
            recommendations: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    pub(crate) fn record_with(
        id: u64,
        scores: &[(&str, f64)],
        overall_score: f64,
    ) -> AssessmentRecord {
        let result = result_with(scores, overall_score);
        AssessmentRecord {
            id: AssessmentId(id),
            updated_at: result.created_at,
            result,
        }
    }
}
