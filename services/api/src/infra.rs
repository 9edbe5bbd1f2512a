use coop_assess::assessment::{
    AssessmentId, AssessmentRecord, AssessmentRepository, Cooperative, CooperativeId,
    RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct StoreState {
    cooperatives: HashMap<CooperativeId, Cooperative>,
    records: BTreeMap<AssessmentId, AssessmentRecord>,
}

/// Process-local store. Cooperatives and records share one lock so an assessment and
/// its cooperative score are written together.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryAssessmentStore {
    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store mutex poisoned".to_string()))
    }

    pub(crate) fn register_cooperative(&self, name: &str) -> Result<Cooperative, RepositoryError> {
        let mut state = self.lock()?;
        let next = state
            .cooperatives
            .keys()
            .map(|id| id.0)
            .max()
            .unwrap_or(0)
            + 1;
        let cooperative = Cooperative {
            id: CooperativeId(next),
            name: name.to_string(),
            score: 0,
        };
        state
            .cooperatives
            .insert(cooperative.id, cooperative.clone());
        Ok(cooperative)
    }
}

impl AssessmentRepository for InMemoryAssessmentStore {
    fn cooperative(&self, id: &CooperativeId) -> Result<Option<Cooperative>, RepositoryError> {
        Ok(self.lock()?.cooperatives.get(id).cloned())
    }

    fn cooperatives(&self) -> Result<Vec<Cooperative>, RepositoryError> {
        Ok(self.lock()?.cooperatives.values().cloned().collect())
    }

    fn insert(
        &self,
        record: AssessmentRecord,
        cooperative_score: i64,
    ) -> Result<AssessmentRecord, RepositoryError> {
        let mut state = self.lock()?;
        if state.records.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        let cooperative = state
            .cooperatives
            .get_mut(&record.result.cooperative_id)
            .ok_or(RepositoryError::NotFound)?;
        cooperative.score = cooperative_score;
        state.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn replace(
        &self,
        record: AssessmentRecord,
        cooperative_score: i64,
    ) -> Result<(), RepositoryError> {
        let mut state = self.lock()?;
        if !state.records.contains_key(&record.id) {
            return Err(RepositoryError::NotFound);
        }
        let cooperative = state
            .cooperatives
            .get_mut(&record.result.cooperative_id)
            .ok_or(RepositoryError::NotFound)?;
        cooperative.score = cooperative_score;
        state.records.insert(record.id, record);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(self.lock()?.records.get(id).cloned())
    }

    fn for_cooperative(
        &self,
        id: &CooperativeId,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Ok(self
            .lock()?
            .records
            .values()
            .filter(|record| record.result.cooperative_id == *id)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Ok(self.lock()?.records.values().cloned().collect())
    }

    fn remove(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        self.lock()?
            .records
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}
