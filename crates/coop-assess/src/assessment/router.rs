use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, CooperativeId, RawAnswer};
use super::repository::{AssessmentRecord, AssessmentRepository, Cooperative};
use super::service::{AssessmentService, SubmissionOutcome};
use super::taxonomy::Category;
use crate::error::AppError;
use crate::reporting::{self, CategoryPerformanceReport, RecommendationReport, ResultsOverview};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentRequest {
    pub cooperative_id: CooperativeId,
    #[serde(default)]
    pub answers: Vec<RawAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssessmentRequest {
    #[serde(default)]
    pub answers: Vec<RawAnswer>,
}

/// Inclusive score bounds for the cooperative ranking.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRangeQuery {
    pub min_score: Option<i64>,
    pub max_score: Option<i64>,
}

#[derive(Debug, Serialize)]
struct QuestionsResponse<'a> {
    categories: &'a [Category],
}

/// Router builder exposing HTTP endpoints for submission, retrieval, and reporting.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments",
            get(list_handler::<R>).post(submit_handler::<R>),
        )
        .route("/api/v1/assessments/questions", get(questions_handler::<R>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(fetch_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/cooperatives/:cooperative_id/assessments",
            get(cooperative_handler::<R>),
        )
        .route("/api/v1/analytics/results", get(results_analytics_handler::<R>))
        .route(
            "/api/v1/analytics/categories",
            get(category_analytics_handler::<R>),
        )
        .route(
            "/api/v1/analytics/recommendations",
            get(recommendation_analytics_handler::<R>),
        )
        .route(
            "/api/v1/analytics/cooperatives",
            get(ranking_analytics_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    payload: Result<Json<SubmitAssessmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionOutcome>), AppError>
where
    R: AssessmentRepository + 'static,
{
    let Json(request) = payload?;
    let outcome = service.submit(request.cooperative_id, &request.answers)?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<u64>,
    payload: Result<Json<UpdateAssessmentRequest>, JsonRejection>,
) -> Result<Json<SubmissionOutcome>, AppError>
where
    R: AssessmentRepository + 'static,
{
    let Json(request) = payload?;
    let outcome = service.update(&AssessmentId(assessment_id), &request.answers)?;
    Ok(Json(outcome))
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<u64>,
) -> Result<Json<AssessmentRecord>, AppError>
where
    R: AssessmentRepository + 'static,
{
    Ok(Json(service.get(&AssessmentId(assessment_id))?))
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<u64>,
) -> Result<StatusCode, AppError>
where
    R: AssessmentRepository + 'static,
{
    service.delete(&AssessmentId(assessment_id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
) -> Result<Json<Vec<AssessmentRecord>>, AppError>
where
    R: AssessmentRepository + 'static,
{
    Ok(Json(service.list()?))
}

pub(crate) async fn cooperative_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(cooperative_id): Path<u64>,
) -> Result<Json<Vec<AssessmentRecord>>, AppError>
where
    R: AssessmentRepository + 'static,
{
    Ok(Json(
        service.for_cooperative(&CooperativeId(cooperative_id))?,
    ))
}

pub(crate) async fn questions_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let payload = QuestionsResponse {
        categories: service.pipeline().taxonomy().categories(),
    };
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn results_analytics_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
) -> Result<Json<ResultsOverview>, AppError>
where
    R: AssessmentRepository + 'static,
{
    let records = service.list()?;
    let cooperatives = service.cooperatives()?;
    Ok(Json(reporting::results_overview(
        &records,
        &cooperatives,
        service.pipeline().classifier(),
        Utc::now(),
    )))
}

pub(crate) async fn category_analytics_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
) -> Result<Json<CategoryPerformanceReport>, AppError>
where
    R: AssessmentRepository + 'static,
{
    let results = service.results()?;
    Ok(Json(reporting::category_performance(
        &results,
        service.pipeline().classifier(),
    )))
}

pub(crate) async fn recommendation_analytics_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
) -> Result<Json<RecommendationReport>, AppError>
where
    R: AssessmentRepository + 'static,
{
    let results = service.results()?;
    Ok(Json(reporting::recommendation_frequency(&results)))
}

pub(crate) async fn ranking_analytics_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Query(range): Query<ScoreRangeQuery>,
) -> Result<Json<Vec<Cooperative>>, AppError>
where
    R: AssessmentRepository + 'static,
{
    let cooperatives = service.cooperatives()?;
    Ok(Json(reporting::cooperatives_by_score(
        &cooperatives,
        range.min_score,
        range.max_score,
    )))
}
