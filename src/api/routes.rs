//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::docs;
use super::handlers::{
    create_student, delete_student, get_student, health, list_students, metrics_text,
    update_student, AppState,
};

/// Create the API router, serving `api_doc` under the docs paths.
pub fn create_router(state: AppState, api_doc: utoipa::openapi::OpenApi) -> Router {
    Router::new()
        // Student CRUD
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        // API docs
        .merge(docs::swagger_ui(api_doc))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
