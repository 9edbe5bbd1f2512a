use crate::assessment::scoring::round_to_hundredths;
use crate::assessment::{AssessmentResult, InterpretationClassifier};

use super::views::{CategoryPerformance, CategoryPerformanceReport};

/// Category scores across all results, grouped by category in order of first appearance.
pub(super) fn scores_per_category(results: &[AssessmentResult]) -> Vec<(String, Vec<f64>)> {
    let mut grouped: Vec<(String, Vec<f64>)> = Vec::new();
    for result in results {
        for (category, score) in result.scores_by_category.iter() {
            match grouped.iter_mut().find(|(name, _)| name == category) {
                Some((_, scores)) => scores.push(score),
                None => grouped.push((category.to_string(), vec![score])),
            }
        }
    }
    grouped
}

pub(super) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Per-category average, spread, and level, weakest category first.
pub fn category_performance(
    results: &[AssessmentResult],
    classifier: &InterpretationClassifier,
) -> CategoryPerformanceReport {
    let mut categories: Vec<CategoryPerformance> = scores_per_category(results)
        .into_iter()
        .map(|(category, scores)| {
            let average = mean(&scores);
            let variance = scores
                .iter()
                .map(|score| (score - average).powi(2))
                .sum::<f64>()
                / scores.len() as f64;
            let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
            let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let average = round_to_hundredths(average);

            CategoryPerformance {
                performance_level: classifier.classify(average).to_string(),
                category,
                average,
                min,
                max,
                standard_deviation: round_to_hundredths(variance.sqrt()),
                assessment_count: scores.len(),
            }
        })
        .collect();

    categories.sort_by(|a, b| a.average.total_cmp(&b.average));

    CategoryPerformanceReport {
        total_categories: categories.len(),
        weakest_category: categories.first().cloned(),
        strongest_category: categories.last().cloned(),
        categories,
    }
}
