use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Months, Utc};

use crate::assessment::scoring::round_to_hundredths;
use crate::assessment::{
    AssessmentRecord, AssessmentResult, Cooperative, CooperativeId, InterpretationClassifier,
    ScoresByCategory,
};

use super::performance::{mean, scores_per_category};
use super::views::{BandCount, InterpretationCount, MonthlyCount, RecentAssessment, ResultsOverview};

const RECENT_ASSESSMENTS: usize = 10;
const GROWTH_WINDOW_MONTHS: u32 = 12;

/// Totals, averages, band distribution, monthly growth, and the latest records.
pub fn results_overview(
    records: &[AssessmentRecord],
    cooperatives: &[Cooperative],
    classifier: &InterpretationClassifier,
    now: DateTime<Utc>,
) -> ResultsOverview {
    let results: Vec<AssessmentResult> =
        records.iter().map(|record| record.result.clone()).collect();

    let overall_scores: Vec<f64> = results.iter().map(|result| result.overall_score).collect();
    let average_overall_score = if overall_scores.is_empty() {
        0.0
    } else {
        round_to_hundredths(mean(&overall_scores))
    };

    let average_scores_by_category: ScoresByCategory = scores_per_category(&results)
        .into_iter()
        .map(|(category, scores)| (category, round_to_hundredths(mean(&scores))))
        .collect();

    let mut score_distribution: Vec<BandCount> = classifier
        .bands()
        .iter()
        .map(|band| BandCount {
            label: band.label.clone(),
            range_min: band.range_min,
            range_max: band.range_max,
            count: 0,
        })
        .collect();
    let mut out_of_range = 0;
    for score in &overall_scores {
        match classifier.band_for(*score) {
            Some((index, _)) => score_distribution[index].count += 1,
            None => out_of_range += 1,
        }
    }

    ResultsOverview {
        total: results.len(),
        average_overall_score,
        average_scores_by_category,
        score_distribution,
        out_of_range,
        interpretation_distribution: interpretation_distribution(&results),
        growth: monthly_growth(&results, now),
        recent_assessments: recent_assessments(records, cooperatives),
    }
}

/// Stored interpretation labels with their counts, most frequent first.
fn interpretation_distribution(results: &[AssessmentResult]) -> Vec<InterpretationCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for result in results {
        *counts.entry(result.interpretation.as_str()).or_default() += 1;
    }

    let mut distribution: Vec<InterpretationCount> = counts
        .into_iter()
        .map(|(interpretation, count)| InterpretationCount {
            interpretation: interpretation.to_string(),
            count,
        })
        .collect();
    distribution.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.interpretation.cmp(&b.interpretation))
    });
    distribution
}

/// Months with no results are left out.
pub fn monthly_growth(results: &[AssessmentResult], now: DateTime<Utc>) -> Vec<MonthlyCount> {
    let cutoff = now
        .checked_sub_months(Months::new(GROWTH_WINDOW_MONTHS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let mut months: BTreeMap<String, usize> = BTreeMap::new();
    for result in results.iter().filter(|result| result.created_at >= cutoff) {
        *months
            .entry(result.created_at.format("%Y-%m").to_string())
            .or_default() += 1;
    }

    months
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}

/// The ten newest records with their cooperative's name.
pub fn recent_assessments(
    records: &[AssessmentRecord],
    cooperatives: &[Cooperative],
) -> Vec<RecentAssessment> {
    let names: HashMap<CooperativeId, &str> = cooperatives
        .iter()
        .map(|cooperative| (cooperative.id, cooperative.name.as_str()))
        .collect();

    let mut newest: Vec<&AssessmentRecord> = records.iter().collect();
    newest.sort_by(|a, b| {
        b.result
            .created_at
            .cmp(&a.result.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });

    newest
        .into_iter()
        .take(RECENT_ASSESSMENTS)
        .map(|record| RecentAssessment {
            id: record.id,
            cooperative_id: record.result.cooperative_id,
            cooperative_name: names
                .get(&record.result.cooperative_id)
                .map(|name| name.to_string()),
            overall_score: record.result.overall_score,
            interpretation: record.result.interpretation.clone(),
            created_at: record.result.created_at,
        })
        .collect()
}
