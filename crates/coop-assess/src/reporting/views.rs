use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::assessment::{AssessmentId, CooperativeId, ScoresByCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandCount {
    pub label: String,
    pub range_min: f64,
    pub range_max: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpretationCount {
    pub interpretation: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsOverview {
    pub total: usize,
    pub average_overall_score: f64,
    pub average_scores_by_category: ScoresByCategory,
    pub score_distribution: Vec<BandCount>,
    pub out_of_range: usize,
    pub interpretation_distribution: Vec<InterpretationCount>,
    /// Results per calendar month (`YYYY-MM`) over the trailing twelve months, oldest first.
    pub growth: Vec<MonthlyCount>,
    pub recent_assessments: Vec<RecentAssessment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAssessment {
    pub id: AssessmentId,
    pub cooperative_id: CooperativeId,
    /// Absent when the cooperative is no longer known.
    pub cooperative_name: Option<String>,
    pub overall_score: f64,
    pub interpretation: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformance {
    pub category: String,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub standard_deviation: f64,
    pub assessment_count: usize,
    pub performance_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformanceReport {
    /// Sorted from weakest to strongest average.
    pub categories: Vec<CategoryPerformance>,
    pub total_categories: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest_category: Option<CategoryPerformance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_category: Option<CategoryPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationFrequency {
    pub category: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReport {
    pub total: usize,
    pub unique_categories: usize,
    pub top_recommendations: Vec<RecommendationFrequency>,
    pub all_recommendations: Vec<RecommendationFrequency>,
}
