use crate::assessment::scoring::round_to_hundredths;
use crate::assessment::AssessmentResult;

use super::views::{RecommendationFrequency, RecommendationReport};

const TOP_RECOMMENDATIONS: usize = 10;

/// How often each category shows up in stored recommendations. The category is the text
/// before the first `:` of a recommendation.
pub fn recommendation_frequency(results: &[AssessmentResult]) -> RecommendationReport {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut total = 0;

    let categories = results
        .iter()
        .flat_map(|result| &result.recommendations)
        .filter_map(|recommendation| recommendation.split(':').next())
        .map(str::trim)
        .filter(|category| !category.is_empty());

    for category in categories {
        match counts.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => counts.push((category.to_string(), 1)),
        }
        total += 1;
    }

    let mut all_recommendations: Vec<RecommendationFrequency> = counts
        .into_iter()
        .map(|(category, count)| RecommendationFrequency {
            percentage: round_to_hundredths(count as f64 / total as f64 * 100.0),
            category,
            count,
        })
        .collect();
    // Stable sort keeps first-seen order among equal counts.
    all_recommendations.sort_by(|a, b| b.count.cmp(&a.count));

    RecommendationReport {
        total,
        unique_categories: all_recommendations.len(),
        top_recommendations: all_recommendations
            .iter()
            .take(TOP_RECOMMENDATIONS)
            .cloned()
            .collect(),
        all_recommendations,
    }
}
