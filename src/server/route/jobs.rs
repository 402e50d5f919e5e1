use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use opentelemetry::KeyValue;
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::super::error::JobRouteError;
use super::super::types::{ApiResponse, JobId, JobRouteResult, JobStatusResponse, SubmitJobRequest, SubmitJobResponse};
use crate::core::config::Config;
use crate::utils::metrics::CONVEYOR_METRICS;
use crate::worker::service::JobService;

/// Handles HTTP requests to submit a new job.
///
/// This endpoint validates the submission, durably persists the job record
/// with status `pending`, and only then publishes the work message for it:
/// 1. Validates the payload shape (rejected submissions never touch the
///    store or the broker)
/// 2. Inserts the job row
/// 3. Publishes the work message referencing the new job id
/// 4. Records metrics and returns the generated id
///
/// A broker publish failure after the insert marks the job `failed` and
/// surfaces 503 so no `pending` row is left behind without a message.
///
/// # Errors
/// * `JobRouteError::InvalidRequest` - If the payload fails validation
/// * `JobRouteError::BrokerUnavailable` - If the work message could not be published
#[instrument(skip(config, request))]
async fn handle_submit_job_request(
    State(config): State<Arc<Config>>,
    Json(request): Json<SubmitJobRequest>,
) -> JobRouteResult {
    match JobService::submit_job(request.payload, request.webhook_url, config).await {
        Ok(job_id) => {
            info!(job_id = %job_id, "Job submitted successfully");
            CONVEYOR_METRICS.jobs_submitted.add(1.0, &[]);
            CONVEYOR_METRICS.successful_job_operations.add(1.0, &[KeyValue::new("operation_type", "submit_job")]);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success_with_data(
                    SubmitJobResponse { job_id },
                    Some(format!("Job with id {} accepted", job_id)),
                )),
            )
                .into_response())
        }
        Err(e) => {
            error!(error = %e, "Failed to submit job");
            CONVEYOR_METRICS.failed_job_operations.add(1.0, &[KeyValue::new("operation_type", "submit_job")]);
            Err(e.into())
        }
    }
}

/// Handles HTTP requests to read a job's status and result.
///
/// Pure read from the store; workers are never consulted.
///
/// # Errors
/// * `JobRouteError::InvalidId` - If the provided ID is not a valid UUID
/// * `JobRouteError::NotFound` - If no job with this ID exists
#[instrument(skip(config), fields(job_id = %id))]
async fn handle_get_job_request(
    Path(JobId { id }): Path<JobId>,
    State(config): State<Arc<Config>>,
) -> JobRouteResult {
    let job_id = Uuid::parse_str(&id).map_err(|_| JobRouteError::InvalidId(id.clone()))?;

    match JobService::get_job(job_id, config).await {
        Ok(job) => {
            Ok(Json(ApiResponse::success_with_data(JobStatusResponse::from(job), None)).into_response())
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch job");
            Err(e.into())
        }
    }
}

/// Creates a router for job-related endpoints.
///
/// # Arguments
/// * `config` - Shared application configuration
///
/// # Returns
/// * `Router` - Configured router with all job endpoints
pub fn job_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/", post(handle_submit_job_request))
        .route("/:id", get(handle_get_job_request))
        .with_state(config)
}
