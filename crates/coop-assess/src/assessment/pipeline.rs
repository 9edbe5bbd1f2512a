use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::domain::{
    AnswerValue, AssessmentError, AssessmentResult, CooperativeId, EnrichedAnswer, RawAnswer,
};
use super::interpretation::InterpretationClassifier;
use super::recommendations::RecommendationGenerator;
use super::resolver::CategoryResolver;
use super::scoring::ScoringEngine;
use super::taxonomy::Taxonomy;

/// Runs one submission through validation, enrichment, scoring, interpretation, and
/// recommendation. Holds no mutable state; a single instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct AssessmentPipeline {
    taxonomy: Arc<Taxonomy>,
    resolver: CategoryResolver,
    scoring: ScoringEngine,
    classifier: InterpretationClassifier,
    recommendations: RecommendationGenerator,
}

impl AssessmentPipeline {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            resolver: CategoryResolver::new(taxonomy.clone()),
            scoring: ScoringEngine::new(),
            classifier: InterpretationClassifier::new(taxonomy.clone()),
            recommendations: RecommendationGenerator::new(taxonomy.clone()),
            taxonomy,
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn classifier(&self) -> &InterpretationClassifier {
        &self.classifier
    }

    pub fn run(
        &self,
        cooperative_id: CooperativeId,
        answers: &[RawAnswer],
    ) -> Result<AssessmentResult, AssessmentError> {
        self.run_at(cooperative_id, answers, Utc::now())
    }

    /// Same as [`run`](Self::run) with an explicit creation timestamp.
    pub fn run_at(
        &self,
        cooperative_id: CooperativeId,
        answers: &[RawAnswer],
        created_at: DateTime<Utc>,
    ) -> Result<AssessmentResult, AssessmentError> {
        let answers = self.enrich(answers)?;
        let summary = self.scoring.score(&answers)?;
        let interpretation = self.classifier.classify(summary.overall_score).to_string();
        let recommendations = self.recommendations.generate(&summary.scores_by_category);

        debug!(
            %cooperative_id,
            answers = answers.len(),
            categories = summary.scores_by_category.len(),
            overall_score = summary.overall_score,
            %interpretation,
            "assessment scored"
        );

        Ok(AssessmentResult {
            cooperative_id,
            answers,
            overall_score: summary.overall_score,
            scores_by_category: summary.scores_by_category,
            interpretation,
            recommendations,
            created_at,
        })
    }

    /// Validates every answer first, then resolves missing categories. Any failure rejects
    /// the whole list.
    pub fn enrich(&self, answers: &[RawAnswer]) -> Result<Vec<EnrichedAnswer>, AssessmentError> {
        if answers.is_empty() {
            return Err(AssessmentError::EmptyAnswerSet);
        }

        let validated = answers
            .iter()
            .enumerate()
            .map(|(index, answer)| validate_answer(index, answer))
            .collect::<Result<Vec<_>, _>>()?;

        validated
            .into_iter()
            .map(|(question_id, category, value)| -> Result<_, AssessmentError> {
                let category = match category {
                    Some(category) => category.to_string(),
                    None => self.resolver.resolve(question_id)?.to_string(),
                };
                Ok(EnrichedAnswer {
                    question_id: question_id.to_string(),
                    category,
                    value,
                })
            })
            .collect()
    }
}

fn validate_answer(
    index: usize,
    answer: &RawAnswer,
) -> Result<(&str, Option<&str>, i64), AssessmentError> {
    let question_id = answer
        .question_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or(AssessmentError::MissingAnswerField {
            index,
            field: "questionId",
        })?;
    let raw_value = answer
        .value
        .as_ref()
        .ok_or(AssessmentError::MissingAnswerField {
            index,
            field: "value",
        })?;
    let value = parse_value(question_id, raw_value)?;
    let category = answer.category.as_deref().filter(|name| !name.is_empty());

    Ok((question_id, category, value))
}

fn parse_value(question_id: &str, value: &AnswerValue) -> Result<i64, AssessmentError> {
    value
        .to_score()
        .ok_or_else(|| AssessmentError::InvalidAnswerValue {
            question_id: question_id.to_string(),
            raw: value.to_string(),
        })
}
