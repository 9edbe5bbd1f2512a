use std::sync::Arc;

use super::domain::AssessmentError;
use super::taxonomy::Taxonomy;

/// Finds the category owning a question id.
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    taxonomy: Arc<Taxonomy>,
}

impl CategoryResolver {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Scans categories, then questions, in declared order and returns the first category
    /// holding a question whose id equals `question_id` exactly.
    pub fn resolve(&self, question_id: &str) -> Result<&str, AssessmentError> {
        self.taxonomy
            .categories()
            .iter()
            .find(|category| {
                category
                    .questions
                    .iter()
                    .any(|question| question.id == question_id)
            })
            .map(|category| category.name.as_str())
            .ok_or_else(|| AssessmentError::UnknownQuestionId(question_id.to_string()))
    }
}
