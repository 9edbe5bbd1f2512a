use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::domain::{AssessmentError, EnrichedAnswer, ScoresByCategory};

/// Per-category averages plus the overall score derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    /// Full-precision category means.
    pub scores_by_category: ScoresByCategory,
    /// Mean of the category means, rounded to two decimals.
    pub overall_score: f64,
}

/// Stateless aggregation of enriched answers.
///
/// Each category contributes equally to the overall score no matter how many of its
/// questions were answered. Question weights are not applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, answers: &[EnrichedAnswer]) -> Result<ScoreSummary, AssessmentError> {
        if answers.is_empty() {
            return Err(AssessmentError::EmptyAnswerSet);
        }

        let mut positions: HashMap<&str, usize> = HashMap::new();
        // Summed in i128: out-of-scale answers near i64::MAX must not overflow.
        let mut totals: Vec<(&str, i128, u32)> = Vec::new();
        for answer in answers {
            let slot = *positions.entry(answer.category.as_str()).or_insert_with(|| {
                totals.push((answer.category.as_str(), 0, 0));
                totals.len() - 1
            });
            let entry = &mut totals[slot];
            entry.1 += i128::from(answer.value);
            entry.2 += 1;
        }

        let scores_by_category: ScoresByCategory = totals
            .iter()
            .map(|(category, sum, count)| (category.to_string(), *sum as f64 / f64::from(*count)))
            .collect();

        let overall = scores_by_category.iter().map(|(_, score)| score).sum::<f64>()
            / scores_by_category.len() as f64;

        Ok(ScoreSummary {
            scores_by_category,
            overall_score: round_to_hundredths(overall),
        })
    }
}

pub(crate) fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
