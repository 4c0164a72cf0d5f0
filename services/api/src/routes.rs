use crate::infra::{AppState, ToolState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use justice_suite::tools::audit::{run_simulation, AuditRequest};
use justice_suite::tools::cases::{case_router, CaseLifecycleService, CaseRepository};
use justice_suite::tools::corrections::GpsReading;
use justice_suite::tools::pretrial::{assess, DefendantProfile};
use justice_suite::tools::sentencing::{SentencingQuery, SentencingResult};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct MatchRequest {
    pub(crate) crime_scene_hash: String,
}

pub(crate) fn with_tool_routes<R>(
    case_service: Arc<CaseLifecycleService<R>>,
    tools: ToolState,
) -> Router
where
    R: CaseRepository + 'static,
{
    let tool_routes = Router::new()
        .route("/investigator/database", get(suspect_database_endpoint))
        .route("/investigator/find_match", post(find_match_endpoint))
        .route("/pretrial/calculate_risk", post(calculate_risk_endpoint))
        .route("/sentencing/recommend", post(recommend_endpoint))
        .route("/sentencing/crime_types", get(crime_types_endpoint))
        .route("/corrections/check_violation", post(check_violation_endpoint))
        .route("/auditor/run_simulation", post(audit_simulation_endpoint))
        .with_state(tools);

    case_router(case_service)
        .merge(tool_routes)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn suspect_database_endpoint(
    State(tools): State<ToolState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "data": tools.suspects.all(),
    }))
}

pub(crate) async fn find_match_endpoint(
    State(tools): State<ToolState>,
    Json(request): Json<MatchRequest>,
) -> Response {
    match tools.suspects.find_match(&request.crime_scene_hash) {
        Some(suspect) => {
            let payload = json!({
                "status": "success",
                "message": "Match Found!",
                "data": suspect,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        None => {
            let payload = json!({
                "status": "not_found",
                "message": "No match found in the database.",
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn calculate_risk_endpoint(
    Json(profile): Json<DefendantProfile>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "data": assess(&profile),
    }))
}

pub(crate) async fn recommend_endpoint(
    State(tools): State<ToolState>,
    Json(query): Json<SentencingQuery>,
) -> Json<SentencingResult> {
    let result = tools.sentencing.recommend_query(&query);
    debug!(
        crime_type = %query.crime_type,
        severity_score = query.severity_score,
        status = result.status.label(),
        "sentencing recommendation served"
    );
    Json(result)
}

pub(crate) async fn crime_types_endpoint(
    State(tools): State<ToolState>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "data": tools.sentencing.crime_types(),
    }))
}

pub(crate) async fn check_violation_endpoint(
    State(tools): State<ToolState>,
    Json(reading): Json<GpsReading>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "data": { "violations": tools.supervision.check(&reading) },
    }))
}

pub(crate) async fn audit_simulation_endpoint(
    Json(request): Json<AuditRequest>,
) -> Json<serde_json::Value> {
    let summary = {
        let mut rng = rand::thread_rng();
        run_simulation(&request, &mut rng)
    };
    Json(json!({
        "status": "success",
        "data": summary,
        "message": "Audit simulation complete.",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use justice_suite::tools::cases::InMemoryCaseRepository;
    use justice_suite::tools::sentencing::{RecommendationStatus, SentencingEngine};
    use serde_json::Value;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn tools() -> ToolState {
        ToolState::new(SentencingEngine::standard())
    }

    fn router() -> Router {
        let case_service = Arc::new(CaseLifecycleService::new(Arc::new(
            InMemoryCaseRepository::default(),
        )));
        with_tool_routes(case_service, tools())
    }

    async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&bytes).expect("json payload"))
    }

    #[tokio::test]
    async fn recommend_endpoint_returns_estimate() {
        let query = SentencingQuery {
            crime_type: "Burglary".to_string(),
            severity_score: 3,
        };

        let Json(result) = recommend_endpoint(State(tools()), Json(query)).await;

        assert_eq!(result.status, RecommendationStatus::EstimatedMatch);
        assert_eq!(result.recommendation_months, Some(27.3));
        assert_eq!(result.case_count, 3);
    }

    #[tokio::test]
    async fn recommend_route_omits_numbers_without_data() {
        let (status, payload) = post_json(
            router(),
            "/sentencing/recommend",
            json!({ "crime_type": "Homicide", "severity_score": 5 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["status"], "NoData");
        assert!(payload.get("recommendation_months").is_none());
        assert_eq!(
            payload["basis"],
            "No historical data found for this crime type."
        );
    }

    #[tokio::test]
    async fn find_match_distinguishes_hits_and_misses() {
        let (status, payload) = post_json(
            router(),
            "/investigator/find_match",
            json!({ "crime_scene_hash": "1234-5678-ABCD" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["data"]["name"], "Peter Jones");

        let (status, payload) = post_json(
            router(),
            "/investigator/find_match",
            json!({ "crime_scene_hash": "0000-0000-0000" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(payload["status"], "not_found");
    }

    #[tokio::test]
    async fn risk_and_violation_routes_compute_results() {
        let (status, payload) = post_json(
            router(),
            "/pretrial/calculate_risk",
            json!({
                "prior_offenses": 2,
                "age_at_first_arrest": 18,
                "has_stable_employment": true
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["data"]["risk_score"], 10);

        let (status, payload) = post_json(
            router(),
            "/corrections/check_violation",
            json!({ "current_x": 95.0, "current_y": 50.0, "current_hour": 12 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            payload["data"]["violations"],
            json!(["Location Violation: Offender is outside the designated safe zone."])
        );
    }

    #[tokio::test]
    async fn audit_route_accepts_default_multiplier() {
        let (status, payload) = post_json(router(), "/auditor/run_simulation", json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["message"], "Audit simulation complete.");
        assert!(payload["data"]["Group A"].as_f64().is_some());
        assert!(payload["data"]["disparity_factor"].as_f64().is_some());
    }

    #[tokio::test]
    async fn case_routes_are_mounted_alongside_tools() {
        let (status, payload) = post_json(
            router(),
            "/case/create",
            json!({ "case_id": "C1", "defendant_name": "Alice" }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(payload["data"]["case_status"], "Investigation");
    }

    fn app_state(ready: bool) -> AppState {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    async fn get_route(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes")
    }

    #[tokio::test]
    async fn ready_route_follows_the_readiness_flag() {
        let state = app_state(false);
        let app = router().layer(Extension(state.clone()));

        let response = get_route(app.clone(), "/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("read body");
        let payload: Value = serde_json::from_slice(&bytes).expect("json payload");
        assert_eq!(payload["status"], "initializing");

        state.readiness.store(true, Ordering::Release);

        let response = get_route(app, "/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("read body");
        let payload: Value = serde_json::from_slice(&bytes).expect("json payload");
        assert_eq!(payload["status"], "ready");
    }

    #[tokio::test]
    async fn metrics_route_serves_prometheus_text() {
        let app = router().layer(Extension(app_state(true)));

        let response = get_route(app, "/metrics").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn health_route_reports_ok() {
        let response = router()
            .oneshot(
                Request::get("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
