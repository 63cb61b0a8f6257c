//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::error::RegistryError;
use crate::metrics::{self, LatencyTimer};
use crate::registry::{parse_student_id, Student, StudentPayload, StudentStore};

/// Body returned for a missing student.
pub const NOT_FOUND_MESSAGE: &str = "Student not found";
/// Body returned after a successful update.
pub const UPDATED_MESSAGE: &str = "Student updated successfully";
/// Body returned after a successful delete.
pub const DELETED_MESSAGE: &str = "Student deleted successfully";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The student collection.
    pub store: Arc<RwLock<StudentStore>>,
    /// Prometheus handle, present when the binary installed a recorder.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a store.
    pub fn new(store: StudentStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            prometheus: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(StudentStore::default())
    }
}

/// Confirmation message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    #[schema(example = "Student updated successfully")]
    pub message: String,
}

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error.
    #[schema(example = "Student not found")]
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Error returned from handlers, rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    /// HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { .. } => {
                debug!("{}", err);
                metrics::inc_students_not_found();
                Self::not_found()
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        debug!("Rejected request body: {}", err);
        Self::bad_request(format!("Invalid request body: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

fn path_id(raw: &str) -> Result<i64, RegistryError> {
    parse_student_id(raw).ok_or(RegistryError::NotFound { id: None })
}

/// List every student in insertion order.
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    responses(
        (status = 200, description = "A list of students", body = [Student])
    )
)]
pub async fn list_students(State(state): State<AppState>) -> Json<Vec<Student>> {
    let _timer = LatencyTimer::new("list_students");
    let store = state.store.read().await;
    Json(store.list().to_vec())
}

/// Get a student by id.
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, minimum = 1, description = "Numeric ID of the student to get")
    ),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    let _timer = LatencyTimer::new("get_student");
    let id = path_id(&raw_id)?;
    let store = state.store.read().await;
    let student = store.find_by_id(id)?.clone();
    Ok(Json(student))
}

/// Create a student; the id is assigned by the store.
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    request_body = StudentPayload,
    responses(
        (status = 201, description = "Created", body = Student),
        (status = 400, description = "Malformed request body", body = ErrorResponse)
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    let _timer = LatencyTimer::new("create_student");
    let payload = StudentPayload::from_body(&body)?;

    let mut store = state.store.write().await;
    let student = store.append(payload);
    metrics::inc_students_created();
    metrics::set_students_stored(store.len());

    info!("Created student {}", student.id);
    Ok((StatusCode::CREATED, Json(student)))
}

/// Replace a student's fields, keeping the id from the path.
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, minimum = 1, description = "Numeric ID of the student to update")
    ),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let _timer = LatencyTimer::new("update_student");
    let payload = StudentPayload::from_body(&body)?;
    let id = path_id(&raw_id)?;

    let mut store = state.store.write().await;
    store.replace_by_id(id, payload)?;
    metrics::inc_students_updated();

    info!("Updated student {}", id);
    Ok(Json(MessageResponse {
        message: UPDATED_MESSAGE.to_string(),
    }))
}

/// Delete a student by id.
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, minimum = 1, description = "Numeric ID of the student to delete")
    ),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    )
)]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let _timer = LatencyTimer::new("delete_student");
    let id = path_id(&raw_id)?;

    let mut store = state.store.write().await;
    store.remove_by_id(id)?;
    metrics::inc_students_deleted();
    metrics::set_students_stored(store.len());

    info!("Deleted student {}", id);
    Ok(Json(MessageResponse {
        message: DELETED_MESSAGE.to_string(),
    }))
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus scrape endpoint; empty when no recorder is installed.
pub async fn metrics_text(State(state): State<AppState>) -> impl IntoResponse {
    let body = state
        .prometheus
        .as_ref()
        .map(PrometheusHandle::render)
        .unwrap_or_default();

    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
