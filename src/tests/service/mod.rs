use crate::core::client::database::MockDatabaseClient;
use crate::core::client::queue::{MockQueueClient, QueueError};
use crate::error::job::JobError;
use crate::tests::config::TestConfigBuilder;
use crate::tests::utils::apply_updates;
use crate::types::jobs::types::JobStatus;
use crate::types::queue::QueueType;
use crate::worker::parser::job_queue_message::JobQueueMessage;
use crate::worker::service::JobService;
use rstest::*;
use serde_json::json;

#[rstest]
#[case::not_an_object(json!("text"))]
#[case::number(json!(42))]
#[case::empty_object(json!({}))]
fn test_validate_submission_rejects_malformed_payloads(#[case] payload: serde_json::Value) {
    let result = JobService::validate_submission(&payload, None);
    assert!(matches!(result, Err(JobError::InvalidJobPayload(_))));
}

#[test]
fn test_validate_submission_rejects_bad_webhook_urls() {
    let payload = json!({"x": 1});
    assert!(matches!(
        JobService::validate_submission(&payload, Some("not a url")),
        Err(JobError::InvalidJobPayload(_))
    ));
    assert!(matches!(
        JobService::validate_submission(&payload, Some("ftp://example.com/hook")),
        Err(JobError::InvalidJobPayload(_))
    ));
    assert!(JobService::validate_submission(&payload, Some("https://example.com/hook")).is_ok());
}

/// A rejected submission must never touch the store or the broker; the
/// strict default mocks panic on any unexpected call.
#[tokio::test]
async fn test_rejected_submission_has_no_side_effects() {
    let config = TestConfigBuilder::new().build();

    let result = JobService::submit_job(json!(42), None, config).await;
    assert!(matches!(result, Err(JobError::InvalidJobPayload(_))));
}

#[tokio::test]
async fn test_submission_persists_job_before_publishing_message() {
    let mut database = MockDatabaseClient::new();
    database
        .expect_create_job()
        .withf(|job| job.status == JobStatus::Pending && job.attempt_count == 0 && job.version == 0)
        .times(1)
        .returning(|job| Ok(job));

    let mut queue = MockQueueClient::new();
    queue
        .expect_send_message()
        .withf(|queue, payload, delay| {
            queue == &QueueType::JobProcessing
                && serde_json::from_str::<JobQueueMessage>(payload).is_ok()
                && delay.is_none()
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let config = TestConfigBuilder::new().with_database(database).with_queue(queue).build();

    let job_id = JobService::submit_job(json!({"x": 1}), None, config).await.unwrap();
    assert!(!job_id.is_nil());
}

/// If the broker publish keeps failing after the store insert committed,
/// the job is marked `failed` with the reason instead of being left as an
/// orphaned `pending` row.
#[tokio::test]
async fn test_publish_failure_after_insert_marks_job_failed() {
    let mut database = MockDatabaseClient::new();
    database.expect_create_job().times(1).returning(|job| Ok(job));
    database
        .expect_update_job()
        .withf(|_, update| {
            update.status == Some(JobStatus::Failed)
                && update.failure_reason.as_deref().is_some_and(|r| r.contains("Failed to publish"))
        })
        .times(1)
        .returning(|job, update| Ok(apply_updates(job, &update)));

    let mut queue = MockQueueClient::new();
    // Publish is retried with backoff before the submission gives up.
    queue
        .expect_send_message()
        .times(3)
        .returning(|_, _, _| Err(QueueError::FailedToGetQueueUrl("job_processing".to_string())));

    let config = TestConfigBuilder::new().with_database(database).with_queue(queue).build();

    let result = JobService::submit_job(json!({"x": 1}), None, config).await;
    assert!(matches!(result, Err(JobError::QueueError(_))));
}
