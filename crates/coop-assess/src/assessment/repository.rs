use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, AssessmentResult, CooperativeId};

/// Cooperative as seen by the assessment workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooperative {
    pub id: CooperativeId,
    pub name: String,
    pub score: i64,
}

/// Stored assessment: the derived result plus its storage metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    #[serde(flatten)]
    pub result: AssessmentResult,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction so the service can be exercised without a database.
///
/// `insert` and `replace` write the record and the owning cooperative's score together:
/// an implementation must apply both or neither.
pub trait AssessmentRepository: Send + Sync {
    fn cooperative(&self, id: &CooperativeId) -> Result<Option<Cooperative>, RepositoryError>;
    fn cooperatives(&self) -> Result<Vec<Cooperative>, RepositoryError>;
    fn insert(
        &self,
        record: AssessmentRecord,
        cooperative_score: i64,
    ) -> Result<AssessmentRecord, RepositoryError>;
    fn replace(&self, record: AssessmentRecord, cooperative_score: i64)
        -> Result<(), RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    fn for_cooperative(&self, id: &CooperativeId)
        -> Result<Vec<AssessmentRecord>, RepositoryError>;
    fn all(&self) -> Result<Vec<AssessmentRecord>, RepositoryError>;
    fn remove(&self, id: &AssessmentId) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
