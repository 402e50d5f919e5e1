use crate::core::config::Config;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use jobs::job_router;
use std::sync::Arc;

pub(super) mod jobs;

/// Handles 404 Not Found responses for the application.
///
/// This handler is used as a fallback when no other routes match the request.
/// It provides a consistent error response format across the application.
pub async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "The requested resource was not found")
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub(crate) fn server_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/jobs", job_router(config.clone()))
        .fallback(handler_404)
}
