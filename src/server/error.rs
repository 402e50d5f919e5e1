use crate::core::client::database::DatabaseError;
use crate::error::job::JobError;
use crate::server::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobRouteError {
    #[error("Invalid job id: {0}")]
    InvalidId(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Job not found: {0}")]
    NotFound(String),

    /// The store write committed but the broker publish failed; the job was
    /// marked failed and the caller should retry with a new submission.
    #[error("Broker unavailable: {0}")]
    BrokerUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for JobRouteError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            JobRouteError::InvalidId(id) => (StatusCode::BAD_REQUEST, format!("Invalid job id: {id}")),
            JobRouteError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            JobRouteError::NotFound(id) => (StatusCode::NOT_FOUND, format!("Job not found: {id}")),
            JobRouteError::BrokerUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            JobRouteError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl From<JobError> for JobRouteError {
    fn from(error: JobError) -> Self {
        match error {
            JobError::InvalidJobPayload(msg) => JobRouteError::InvalidRequest(msg),
            JobError::InvalidId { id } => JobRouteError::InvalidId(id),
            JobError::JobNotFound { id } => JobRouteError::NotFound(id.to_string()),
            JobError::QueueError(e) => JobRouteError::BrokerUnavailable(e.to_string()),
            JobError::DatabaseError(DatabaseError::ItemAlreadyExists(msg)) => JobRouteError::InvalidRequest(msg),
            other => JobRouteError::InternalError(other.to_string()),
        }
    }
}
