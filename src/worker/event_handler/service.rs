use futures::FutureExt;
use opentelemetry::KeyValue;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::core::client::database::DatabaseError;
use crate::core::config::Config;
use crate::error::job::JobError;
use crate::types::jobs::job_item::JobItem;
use crate::types::jobs::job_updates::JobItemUpdates;
use crate::types::jobs::types::JobStatus;
use crate::utils::metrics::CONVEYOR_METRICS;
use crate::worker::service::JobService;

/// What the worker slot should do with the broker delivery once handling
/// finished. `Requeue` nacks so the broker redelivers; `Acknowledge`
/// removes the message for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryDisposition {
    Acknowledge,
    Requeue,
}

pub struct JobHandlerService;

impl JobHandlerService {
    /// Processes one delivery of a work message, the receive-execute-settle
    /// contract of the pipeline:
    ///
    /// 1. Load the job; a missing record means the store (the authority)
    ///    no longer knows the job — discard the message.
    /// 2. Discard deliveries for terminal jobs without re-executing the
    ///    body; this is what makes at-least-once delivery effectively
    ///    at-most-once processing.
    /// 3. Claim the job: `in_progress`, attempt_count + 1, guarded by the
    ///    optimistic version filter. Losing the race means another slot
    ///    holds a concurrent delivery — this one becomes a no-op.
    /// 4. Execute the body and either persist the result (`succeeded`),
    ///    hand the job back to the queue (`pending` + requeue) while the
    ///    retry budget lasts, or finalize as `failed`.
    pub async fn process_job(id: Uuid, config: Arc<Config>) -> Result<DeliveryDisposition, JobError> {
        let start = Instant::now();

        let Some(job) = config.database().get_job_by_id(id).await? else {
            warn!(job_id = %id, "Received delivery for unknown job, discarding message");
            return Ok(DeliveryDisposition::Acknowledge);
        };

        if job.status.is_terminal() {
            debug!(job_id = %id, status = %job.status, "Duplicate delivery for terminal job, discarding");
            return Ok(DeliveryDisposition::Acknowledge);
        }

        if job.status == JobStatus::InProgress {
            // Prior holder crashed before acking; re-execute from scratch.
            info!(job_id = %id, attempt = job.attempt_count, "Resuming job left in_progress by a lost worker");
        }

        let claimed = match config
            .database()
            .update_job(
                &job,
                JobItemUpdates::new()
                    .update_status(JobStatus::InProgress)
                    .update_attempt_count(job.attempt_count + 1)
                    .build(),
            )
            .await
        {
            Ok(job) => job,
            Err(DatabaseError::UpdateFailed(_)) => {
                warn!(job_id = %id, "Job version changed underneath this delivery, aborting as a no-op");
                return Ok(DeliveryDisposition::Acknowledge);
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            job_id = %claimed.id,
            attempt = claimed.attempt_count,
            budget = config.service_params().retry_budget,
            "Processing job"
        );

        // Job-body failures (and panics) are settled against the job record;
        // they never take the worker slot down with them.
        let execution = AssertUnwindSafe(config.executor().execute(&claimed)).catch_unwind().await;
        let disposition = match execution {
            Ok(Ok(result)) => Self::handle_execution_success(&claimed, result, config).await?,
            Ok(Err(e)) => Self::handle_execution_failure(&claimed, e.to_string(), config).await?,
            Err(panic) => {
                let msg = Self::extract_panic_message(&panic);
                error!(job_id = %claimed.id, panic = %msg, "Job body panicked");
                Self::handle_execution_failure(&claimed, format!("Panic: {msg}"), config).await?
            }
        };

        CONVEYOR_METRICS
            .jobs_response_time
            .record(start.elapsed().as_secs_f64(), &[KeyValue::new("operation_type", "process_job")]);
        Ok(disposition)
    }

    /// Handles a delivery from the dead-letter queue. The broker has given
    /// up redelivering this message, so the referenced job is finalized as
    /// failed (a no-op when it already reached a terminal state).
    pub async fn handle_job_failure(id: Uuid, config: Arc<Config>) -> Result<DeliveryDisposition, JobError> {
        let Some(job) = config.database().get_job_by_id(id).await? else {
            warn!(job_id = %id, "Dead-lettered message for unknown job, discarding");
            return Ok(DeliveryDisposition::Acknowledge);
        };

        info!(job_id = %job.id, status = %job.status, "Handling dead-lettered job");
        JobService::move_job_to_failed(
            &job,
            config,
            format!("Work message was dead-lettered while job status was: {}", job.status),
        )
        .await?;
        Ok(DeliveryDisposition::Acknowledge)
    }

    fn extract_panic_message(panic: &Box<dyn std::any::Any + Send>) -> String {
        panic
            .downcast_ref::<String>()
            .map(|s| s.as_str())
            .or_else(|| panic.downcast_ref::<&str>().copied())
            .unwrap_or("Unknown panic")
            .to_string()
    }

    async fn handle_execution_success(
        job: &JobItem,
        result: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<DeliveryDisposition, JobError> {
        let succeeded = config
            .database()
            .update_job(
                job,
                JobItemUpdates::new().update_status(JobStatus::Succeeded).update_result(result).build(),
            )
            .await?;

        info!(job_id = %job.id, attempt = job.attempt_count, "Job succeeded");
        CONVEYOR_METRICS.successful_job_operations.add(1.0, &[KeyValue::new("operation_type", "process_job")]);

        JobService::notify_webhook(&succeeded, config).await;
        Ok(DeliveryDisposition::Acknowledge)
    }

    /// A failed attempt under budget hands the job back to `pending` and
    /// requeues the delivery; at budget the job is terminally failed and
    /// the delivery acknowledged so it stops circulating.
    async fn handle_execution_failure(
        job: &JobItem,
        reason: String,
        config: Arc<Config>,
    ) -> Result<DeliveryDisposition, JobError> {
        let reason = format!("Attempt {} failed: {}", job.attempt_count, reason);

        if job.attempt_count < config.service_params().retry_budget {
            info!(
                job_id = %job.id,
                attempt = job.attempt_count,
                budget = config.service_params().retry_budget,
                "Job attempt failed, returning job to pending for redelivery"
            );

            config
                .database()
                .update_job(
                    job,
                    JobItemUpdates::new().update_status(JobStatus::Pending).update_failure_reason(reason).build(),
                )
                .await?;

            CONVEYOR_METRICS.failed_job_operations.add(1.0, &[KeyValue::new("operation_type", "process_job")]);
            Ok(DeliveryDisposition::Requeue)
        } else {
            error!(
                job_id = %job.id,
                attempt = job.attempt_count,
                "Job failed permanently, retry budget exhausted"
            );

            let failed = config
                .database()
                .update_job(
                    job,
                    JobItemUpdates::new().update_status(JobStatus::Failed).update_failure_reason(reason).build(),
                )
                .await?;

            CONVEYOR_METRICS.failed_jobs.add(1.0, &[KeyValue::new("operation_type", "process_job")]);

            JobService::notify_webhook(&failed, config).await;
            Ok(DeliveryDisposition::Acknowledge)
        }
    }
}
