use opentelemetry::KeyValue;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

use crate::core::config::Config;
use crate::error::job::JobError;
use crate::types::jobs::job_item::JobItem;
use crate::types::jobs::job_updates::JobItemUpdates;
use crate::types::jobs::types::JobStatus;
use crate::types::queue::QueueType;
use crate::utils::metrics::CONVEYOR_METRICS;
use crate::utils::retry::retry_with_backoff;
use crate::worker::parser::job_queue_message::JobQueueMessage;

/// Transient broker hiccups on publish are retried here before the
/// submission is declared failed.
const QUEUE_PUBLISH_ATTEMPTS: u32 = 3;
const QUEUE_PUBLISH_BASE_DELAY: Duration = Duration::from_millis(200);

pub struct JobService;

impl JobService {
    /// Retrieves a job by its ID from the store
    ///
    /// # Returns
    /// * `Result<JobItem, JobError>` - The job if found, or JobNotFound error
    pub(crate) async fn get_job(id: Uuid, config: Arc<Config>) -> Result<JobItem, JobError> {
        config.database().get_job_by_id(id).await?.ok_or(JobError::JobNotFound { id })
    }

    /// Validates a submission before any side effect happens. The payload
    /// is opaque downstream, but the gateway still requires a non-empty
    /// JSON object so garbage never reaches the store or the broker.
    pub fn validate_submission(payload: &Value, webhook_url: Option<&str>) -> Result<(), JobError> {
        let object = payload
            .as_object()
            .ok_or_else(|| JobError::InvalidJobPayload("payload must be a JSON object".to_string()))?;
        if object.is_empty() {
            return Err(JobError::InvalidJobPayload("payload must not be empty".to_string()));
        }
        if let Some(webhook_url) = webhook_url {
            let parsed = Url::parse(webhook_url)
                .map_err(|e| JobError::InvalidJobPayload(format!("webhook_url is not a valid URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(JobError::InvalidJobPayload("webhook_url must use http or https".to_string()));
            }
        }
        Ok(())
    }

    /// Accepts a new job: validates, durably inserts the `pending` record,
    /// then publishes the work message referencing it.
    ///
    /// Ordering requirement: the store insert commits before the publish is
    /// attempted. If the publish still fails after bounded retry, the job
    /// is marked `failed` with the reason instead of being left silently
    /// `pending` with no corresponding message.
    pub async fn submit_job(payload: Value, webhook_url: Option<String>, config: Arc<Config>) -> Result<Uuid, JobError> {
        Self::validate_submission(&payload, webhook_url.as_deref())?;

        let job = config.database().create_job(JobItem::new(payload, webhook_url)).await?;

        let publish_result = retry_with_backoff(
            || Self::add_job_to_process_queue(job.id, config.clone()),
            QUEUE_PUBLISH_ATTEMPTS,
            QUEUE_PUBLISH_BASE_DELAY,
            "work message publish",
        )
        .await;

        if let Err(publish_error) = publish_result {
            tracing::error!(job_id = %job.id, error = %publish_error, "Publish failed after store insert, marking job as failed");
            Self::move_job_to_failed(
                &job,
                config.clone(),
                format!("Failed to publish work message: {publish_error}"),
            )
            .await?;
            return Err(publish_error);
        }

        Ok(job.id)
    }

    /// Add a job into the queue with the given delay
    ///
    /// # Arguments
    /// * `config` - Shared configuration
    /// * `id` - UUID of the job to process
    /// * `queue` - Queue type to add the job to
    /// * `delay` - Optional delay for the job to be added to the queue
    async fn add_job_to_queue(
        config: Arc<Config>,
        id: Uuid,
        queue: QueueType,
        delay: Option<Duration>,
    ) -> Result<(), JobError> {
        let message = JobQueueMessage::new(id);
        let payload = serde_json::to_string(&message)?;

        tracing::debug!(queue = ?queue, job_id = %id, "Sending message to queue");

        config.queue().send_message(queue.clone(), payload, delay).await.inspect_err(|e| {
            tracing::error!(queue = ?queue, job_id = %id, error = ?e, "Failed to send message to queue");
        })?;

        Ok(())
    }

    /// Adds a job to the processing queue
    pub async fn add_job_to_process_queue(id: Uuid, config: Arc<Config>) -> Result<(), JobError> {
        Self::add_job_to_queue(config, id, QueueType::JobProcessing, None).await
    }

    /// Moves a job to the Failed state with the provided reason
    ///
    /// # Notes
    /// * Skips processing if the job is already in a terminal status
    /// * Records the failure reason on the job record
    /// * Updates metrics for failed jobs and notifies the webhook
    pub async fn move_job_to_failed(job: &JobItem, config: Arc<Config>, reason: String) -> Result<(), JobError> {
        if job.status == JobStatus::Succeeded {
            tracing::error!(job_id = ?job.id, job_status = ?job.status, "Invalid state exists on DL queue");
            return Ok(());
        }
        // We assume that a Failed status will only show up if the message is sent twice from a queue
        // Can return silently because it's already been processed.
        else if job.status == JobStatus::Failed {
            tracing::warn!(job_id = ?job.id, "Job already marked as failed, skipping processing");
            return Ok(());
        }

        tracing::debug!(job_id = ?job.id, "Updating job status to Failed in database");
        let failed = config
            .database()
            .update_job(
                job,
                JobItemUpdates::new().update_status(JobStatus::Failed).update_failure_reason(reason.clone()).build(),
            )
            .await?;

        tracing::info!(job_id = %job.id, reason = %reason, "Job marked as failed");
        CONVEYOR_METRICS.failed_jobs.add(1.0, &[KeyValue::new("operation_type", "move_job_to_failed")]);

        Self::notify_webhook(&failed, config).await;
        Ok(())
    }

    /// Best-effort terminal-status callback. A webhook failure is logged
    /// and never charged against the job.
    pub(crate) async fn notify_webhook(job: &JobItem, config: Arc<Config>) {
        let Some(webhook_url) = &job.webhook_url else {
            return;
        };

        let body = json!({
            "job_id": job.id,
            "status": job.status,
            "failure_reason": job.failure_reason,
        });

        match config.notification_client().post(webhook_url.clone()).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(job_id = %job.id, webhook_url = %webhook_url, "Webhook notified");
            }
            Ok(response) => {
                tracing::warn!(
                    job_id = %job.id,
                    webhook_url = %webhook_url,
                    status = %response.status(),
                    "Webhook responded with non-success status"
                );
            }
            Err(e) => {
                tracing::warn!(job_id = %job.id, webhook_url = %webhook_url, error = %e, "Failed to notify webhook");
            }
        }
    }
}
