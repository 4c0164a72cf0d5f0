use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::CaseId;
use super::repository::CaseRepository;
use super::service::{CaseLifecycleService, CaseServiceError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCaseRequest {
    pub case_id: String,
    pub defendant_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRequest {
    pub evidence_item: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    pub new_status: String,
}

/// Router builder exposing the case-file endpoints.
pub fn case_router<R>(service: Arc<CaseLifecycleService<R>>) -> Router
where
    R: CaseRepository + 'static,
{
    Router::new()
        .route("/cases", get(list_handler::<R>))
        .route("/case/create", post(create_handler::<R>))
        .route("/case/:case_id", get(get_handler::<R>))
        .route("/case/:case_id/add_evidence", put(evidence_handler::<R>))
        .route("/case/:case_id/update_status", put(status_handler::<R>))
        .with_state(service)
}

fn success<T: Serialize>(status: StatusCode, data: T) -> Response {
    let payload = json!({
        "status": "success",
        "data": data,
    });
    (status, axum::Json(payload)).into_response()
}

fn error_response(error: CaseServiceError) -> Response {
    match error {
        CaseServiceError::DuplicateCase(_) => {
            let payload = json!({
                "status": "error",
                "message": "Case ID already exists.",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        CaseServiceError::CaseNotFound(_) => {
            let payload = json!({
                "status": "not_found",
                "message": "Case not found.",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        CaseServiceError::Repository(error) => {
            warn!(%error, "case registry unavailable");
            let payload = json!({
                "status": "error",
                "message": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<CaseLifecycleService<R>>>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match service.all_cases() {
        Ok(records) => success(StatusCode::OK, records),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<CaseLifecycleService<R>>>,
    axum::Json(request): axum::Json<CreateCaseRequest>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match service.create_case(CaseId(request.case_id), request.defendant_name) {
        Ok(record) => success(StatusCode::CREATED, record),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<CaseLifecycleService<R>>>,
    Path(case_id): Path<String>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match service.get_case(&CaseId(case_id)) {
        Ok(record) => success(StatusCode::OK, record),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evidence_handler<R>(
    State(service): State<Arc<CaseLifecycleService<R>>>,
    Path(case_id): Path<String>,
    axum::Json(request): axum::Json<EvidenceRequest>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match service.add_evidence(&CaseId(case_id), request.evidence_item) {
        Ok(record) => success(StatusCode::OK, record),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<CaseLifecycleService<R>>>,
    Path(case_id): Path<String>,
    axum::Json(request): axum::Json<StatusRequest>,
) -> Response
where
    R: CaseRepository + 'static,
{
    match service.update_status(&CaseId(case_id), request.new_status) {
        Ok(record) => success(StatusCode::OK, record),
        Err(error) => error_response(error),
    }
}
