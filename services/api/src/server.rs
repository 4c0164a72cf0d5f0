use crate::cli::ServeArgs;
use crate::infra::{load_sentencing_engine, AppState, ToolState};
use crate::routes::with_tool_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use justice_suite::config::AppConfig;
use justice_suite::error::AppError;
use justice_suite::telemetry;
use justice_suite::tools::cases::{CaseLifecycleService, InMemoryCaseRepository};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
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

    let sentencing = load_sentencing_engine(&config.sentencing)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryCaseRepository::default());
    let case_service = Arc::new(CaseLifecycleService::new(repository));

    let app = with_tool_routes(case_service, ToolState::new(sentencing))
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "justice suite api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
