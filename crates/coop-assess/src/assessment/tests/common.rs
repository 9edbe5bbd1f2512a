use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::{
    assessment_router, AssessmentId, AssessmentPipeline, AssessmentRecord, AssessmentRepository,
    AssessmentService, Cooperative, CooperativeId, RawAnswer, RepositoryError, Taxonomy,
};

pub(super) const COOPERATIVE: CooperativeId = CooperativeId(7);
pub(super) const COOPERATIVE_NAME: &str = "Coop Atlas";

pub(super) fn pipeline() -> Arc<AssessmentPipeline> {
    let taxonomy = Taxonomy::standard().expect("standard taxonomy");
    Arc::new(AssessmentPipeline::new(Arc::new(taxonomy)))
}

/// m1=4 and m2=2 average to 3.0 for "Marketing - Digital", o1=5 gives 5.0 for
/// "Opérationnel - Logistique", so the overall score is 4.0.
pub(super) fn sample_answers() -> Vec<RawAnswer> {
    vec![
        RawAnswer::new("m1", 4),
        RawAnswer::new("m2", 2),
        RawAnswer::new("o1", 5),
    ]
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::with_cooperative(COOPERATIVE, COOPERATIVE_NAME));
    let service = AssessmentService::new(repository.clone(), pipeline());
    (service, repository)
}

pub(super) fn assessment_router_with_service(
    service: AssessmentService<MemoryRepository>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

#[derive(Default)]
struct Store {
    cooperatives: HashMap<CooperativeId, Cooperative>,
    records: BTreeMap<AssessmentId, AssessmentRecord>,
}

/// Keeps cooperatives and records behind one lock so score and record writes land
/// together.
#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    store: Arc<Mutex<Store>>,
}

impl MemoryRepository {
    pub(super) fn with_cooperative(id: CooperativeId, name: &str) -> Self {
        let repository = Self::default();
        repository.store.lock().expect("store mutex poisoned").cooperatives.insert(
            id,
            Cooperative {
                id,
                name: name.to_string(),
                score: 0,
            },
        );
        repository
    }

    pub(super) fn add_cooperative(&self, id: CooperativeId, name: &str) {
        self.store.lock().expect("store mutex poisoned").cooperatives.insert(
            id,
            Cooperative {
                id,
                name: name.to_string(),
                score: 0,
            },
        );
    }

    pub(super) fn cooperative_score(&self, id: CooperativeId) -> Option<i64> {
        let store = self.store.lock().expect("store mutex poisoned");
        store.cooperatives.get(&id).map(|cooperative| cooperative.score)
    }

    pub(super) fn record_count(&self) -> usize {
        self.store.lock().expect("store mutex poisoned").records.len()
    }
}

impl AssessmentRepository for MemoryRepository {
    fn cooperative(&self, id: &CooperativeId) -> Result<Option<Cooperative>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store.cooperatives.get(id).cloned())
    }

    fn cooperatives(&self) -> Result<Vec<Cooperative>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store.cooperatives.values().cloned().collect())
    }

    fn insert(
        &self,
        record: AssessmentRecord,
        cooperative_score: i64,
    ) -> Result<AssessmentRecord, RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        if store.records.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        let cooperative = store
            .cooperatives
            .get_mut(&record.result.cooperative_id)
            .ok_or(RepositoryError::NotFound)?;
        cooperative.score = cooperative_score;
        store.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn replace(
        &self,
        record: AssessmentRecord,
        cooperative_score: i64,
    ) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        if !store.records.contains_key(&record.id) {
            return Err(RepositoryError::NotFound);
        }
        let cooperative = store
            .cooperatives
            .get_mut(&record.result.cooperative_id)
            .ok_or(RepositoryError::NotFound)?;
        cooperative.score = cooperative_score;
        store.records.insert(record.id, record);
        Ok(())
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store.records.get(id).cloned())
    }

    fn for_cooperative(
        &self,
        id: &CooperativeId,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store
            .records
            .values()
            .filter(|record| record.result.cooperative_id == *id)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let store = self.store.lock().expect("store mutex poisoned");
        Ok(store.records.values().cloned().collect())
    }

    fn remove(&self, id: &AssessmentId) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().expect("store mutex poisoned");
        store
            .records
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Knows the cooperative but fails every write.
pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn cooperative(&self, id: &CooperativeId) -> Result<Option<Cooperative>, RepositoryError> {
        Ok(Some(Cooperative {
            id: *id,
            name: COOPERATIVE_NAME.to_string(),
            score: 0,
        }))
    }

    fn cooperatives(&self) -> Result<Vec<Cooperative>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(
        &self,
        _record: AssessmentRecord,
        _cooperative_score: i64,
    ) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn replace(
        &self,
        _record: AssessmentRecord,
        _cooperative_score: i64,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_cooperative(
        &self,
        _id: &CooperativeId,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &AssessmentId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
