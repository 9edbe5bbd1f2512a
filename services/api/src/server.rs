use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAssessmentStore};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use coop_assess::assessment::{AssessmentPipeline, AssessmentService};
use coop_assess::config::AppConfig;
use coop_assess::error::AppError;
use coop_assess::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let taxonomy = Arc::new(config.assessment.load_taxonomy()?);
    info!(
        categories = taxonomy.categories().len(),
        questions = taxonomy.question_count(),
        bands = taxonomy.scale_bands().len(),
        source = ?config.assessment.taxonomy_path,
        "taxonomy loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryAssessmentStore::default());
    let pipeline = Arc::new(AssessmentPipeline::new(taxonomy));
    let assessment_service = Arc::new(AssessmentService::new(store.clone(), pipeline));

    let app = with_operational_routes(assessment_service)
        .layer(Extension(store))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "cooperative assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
