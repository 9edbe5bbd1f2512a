use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{AssessmentError, AssessmentId, AssessmentResult, CooperativeId, RawAnswer};
use super::pipeline::AssessmentPipeline;
use super::repository::{AssessmentRecord, AssessmentRepository, Cooperative, RepositoryError};

/// Service composing the scoring pipeline with the persistence collaborator.
pub struct AssessmentService<R> {
    pipeline: Arc<AssessmentPipeline>,
    repository: Arc<R>,
    sequence: AtomicU64,
}

/// Stored record together with the cooperative score written alongside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub assessment: AssessmentRecord,
    pub cooperative_score: i64,
}

impl<R> AssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, pipeline: Arc<AssessmentPipeline>) -> Self {
        Self {
            pipeline,
            repository,
            sequence: AtomicU64::new(1),
        }
    }

    pub fn pipeline(&self) -> &AssessmentPipeline {
        &self.pipeline
    }

    fn next_assessment_id(&self) -> AssessmentId {
        AssessmentId(self.sequence.fetch_add(1, Ordering::Relaxed))
    }

    /// Score a new submission and persist it with the cooperative's updated score.
    pub fn submit(
        &self,
        cooperative_id: CooperativeId,
        answers: &[RawAnswer],
    ) -> Result<SubmissionOutcome, AssessmentServiceError> {
        self.repository
            .cooperative(&cooperative_id)?
            .ok_or(AssessmentServiceError::CooperativeNotFound(cooperative_id))?;

        let result = self.pipeline.run(cooperative_id, answers).map_err(|err| {
            warn!(%cooperative_id, error = %err, "assessment rejected");
            err
        })?;
        let cooperative_score = result.cooperative_score();
        let record = AssessmentRecord {
            id: self.next_assessment_id(),
            updated_at: result.created_at,
            result,
        };

        let stored = self.repository.insert(record, cooperative_score)?;
        info!(
            assessment_id = %stored.id,
            %cooperative_id,
            overall_score = stored.result.overall_score,
            cooperative_score,
            "assessment recorded"
        );

        Ok(SubmissionOutcome {
            assessment: stored,
            cooperative_score,
        })
    }

    /// Re-run the whole pipeline on new answers and replace the stored record. The
    /// original creation time is kept.
    pub fn update(
        &self,
        assessment_id: &AssessmentId,
        answers: &[RawAnswer],
    ) -> Result<SubmissionOutcome, AssessmentServiceError> {
        let existing = self
            .repository
            .fetch(assessment_id)?
            .ok_or(AssessmentServiceError::AssessmentNotFound(*assessment_id))?;
        let cooperative_id = existing.result.cooperative_id;
        self.repository
            .cooperative(&cooperative_id)?
            .ok_or(AssessmentServiceError::CooperativeNotFound(cooperative_id))?;

        let result =
            self.pipeline
                .run_at(cooperative_id, answers, existing.result.created_at)?;
        let cooperative_score = result.cooperative_score();
        let record = AssessmentRecord {
            id: existing.id,
            result,
            updated_at: Utc::now(),
        };

        self.repository.replace(record.clone(), cooperative_score)?;
        info!(
            %assessment_id,
            %cooperative_id,
            overall_score = record.result.overall_score,
            cooperative_score,
            "assessment replaced"
        );

        Ok(SubmissionOutcome {
            assessment: record,
            cooperative_score,
        })
    }

    pub fn get(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        self.repository
            .fetch(assessment_id)?
            .ok_or(AssessmentServiceError::AssessmentNotFound(*assessment_id))
    }

    /// All records, newest first.
    pub fn list(&self) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        let mut records = self.repository.all()?;
        newest_first(&mut records);
        Ok(records)
    }

    /// Records of one cooperative, newest first.
    pub fn for_cooperative(
        &self,
        cooperative_id: &CooperativeId,
    ) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        self.repository
            .cooperative(cooperative_id)?
            .ok_or(AssessmentServiceError::CooperativeNotFound(*cooperative_id))?;
        let mut records = self.repository.for_cooperative(cooperative_id)?;
        newest_first(&mut records);
        Ok(records)
    }

    pub fn delete(&self, assessment_id: &AssessmentId) -> Result<(), AssessmentServiceError> {
        match self.repository.remove(assessment_id) {
            Ok(()) => {
                info!(%assessment_id, "assessment deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                Err(AssessmentServiceError::AssessmentNotFound(*assessment_id))
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Every known cooperative with its current score.
    pub fn cooperatives(&self) -> Result<Vec<Cooperative>, AssessmentServiceError> {
        Ok(self.repository.cooperatives()?)
    }

    /// Results of every stored record, for reporting.
    pub fn results(&self) -> Result<Vec<AssessmentResult>, AssessmentServiceError> {
        Ok(self
            .repository
            .all()?
            .into_iter()
            .map(|record| record.result)
            .collect())
    }
}

fn newest_first(records: &mut [AssessmentRecord]) {
    records.sort_by(|a, b| {
        b.result
            .created_at
            .cmp(&a.result.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] AssessmentError),
    #[error("cooperative {0} not found")]
    CooperativeNotFound(CooperativeId),
    #[error("assessment {0} not found")]
    AssessmentNotFound(AssessmentId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
