//! Cooperative self-assessment scoring.
//!
//! A submission flows through [`AssessmentPipeline`]: answers are validated, missing
//! categories are resolved against the [`Taxonomy`], category means and the overall
//! mean-of-means are computed, the overall score is interpreted, and per-category
//! recommendations are generated. [`AssessmentService`] adds persistence through an
//! [`AssessmentRepository`] and [`assessment_router`] exposes it over HTTP.

pub mod domain;
pub mod import;
pub mod interpretation;
pub mod pipeline;
pub mod recommendations;
pub mod repository;
pub mod resolver;
pub mod router;
pub mod scoring;
pub mod service;
pub mod taxonomy;

#[cfg(test)]
mod tests;

pub use domain::{
    cooperative_score, AnswerValue, AssessmentError, AssessmentId, AssessmentResult,
    CooperativeId, EnrichedAnswer, RawAnswer, ScoresByCategory,
};
pub use import::{AnswerImportError, AnswerImporter};
pub use interpretation::{InterpretationClassifier, OUT_OF_RANGE_LABEL};
pub use pipeline::AssessmentPipeline;
pub use recommendations::{RecommendationGenerator, AXIS_KEYWORDS};
pub use repository::{AssessmentRecord, AssessmentRepository, Cooperative, RepositoryError};
pub use resolver::CategoryResolver;
pub use router::{
    assessment_router, ScoreRangeQuery, SubmitAssessmentRequest, UpdateAssessmentRequest,
};
pub use scoring::{ScoreSummary, ScoringEngine};
pub use service::{AssessmentService, AssessmentServiceError, SubmissionOutcome};
pub use taxonomy::{
    Axis, AxisRecommendations, Category, Question, ScaleBand, Taxonomy, TaxonomyError,
};
