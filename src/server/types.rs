use crate::types::jobs::job_item::JobItem;
use crate::types::jobs::types::JobStatus;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::error::JobRouteError;

/// Represents a job identifier in API requests.
///
/// This struct is used to deserialize job IDs from incoming HTTP requests,
/// particularly in path parameters.
#[derive(Deserialize)]
pub struct JobId {
    /// The string representation of the job's UUID
    pub id: String,
}

/// Represents a standardized API response structure.
///
/// This struct provides a consistent format for all API responses, including
/// both successful operations and errors.
///
/// # Fields
/// * `success` - Indicates whether the operation was successful
/// * `data` - Optional payload
/// * `message` - Optional message providing additional details (typically used for errors)
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T = ()> {
    /// Indicates if the operation was successful
    pub success: bool,
    /// Optional data payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Optional message, typically used for error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse<()> {
    /// Creates an error response with the specified message.
    pub fn error(message: String) -> Self {
        Self { success: false, data: None, message: Some(message) }
    }
}

impl<T> ApiResponse<T> {
    /// Creates a successful response with data and an optional message.
    pub fn success_with_data(data: T, message: Option<String>) -> Self {
        Self { success: true, data: Some(data), message }
    }

    /// Creates a successful response with no data payload.
    pub fn success(message: Option<String>) -> Self {
        Self { success: true, data: None, message }
    }
}

/// Type alias for the result type used in job route handlers.
pub type JobRouteResult = Result<Response<axum::body::Body>, JobRouteError>;

/// Body of a `POST /jobs` submission.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubmitJobRequest {
    /// Opaque job input, carried through the pipeline untouched
    pub payload: Value,
    /// Optional callback notified when the job reaches a terminal state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubmitJobResponse {
    pub job_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JobStatusResponse {
    pub job_id: Uuid,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    pub attempt_count: i32,
}

impl From<JobItem> for JobStatusResponse {
    fn from(job: JobItem) -> Self {
        Self {
            job_id: job.id,
            status: job.status,
            result: job.result,
            failure_reason: job.failure_reason,
            attempt_count: job.attempt_count,
        }
    }
}
