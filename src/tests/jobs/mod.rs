use crate::core::client::database::{DatabaseError, MockDatabaseClient};
use crate::core::client::executor::{ExecutorError, MockJobExecutor};
use crate::tests::config::TestConfigBuilder;
use crate::tests::utils::{apply_updates, build_job_item};
use crate::types::jobs::types::JobStatus;
use crate::worker::event_handler::service::{DeliveryDisposition, JobHandlerService};
use httpmock::prelude::*;
use mockall::predicate::eq;
use rstest::*;
use serde_json::json;
use uuid::Uuid;

fn database_returning_job(job: crate::types::jobs::job_item::JobItem) -> MockDatabaseClient {
    let mut database = MockDatabaseClient::new();
    let id = job.id;
    database.expect_get_job_by_id().with(eq(id)).times(1).returning(move |_| Ok(Some(job.clone())));
    database
}

#[rstest]
#[tokio::test]
async fn test_process_job_executes_and_succeeds() {
    let job = build_job_item(JobStatus::Pending, 0);
    let job_id = job.id;

    let mut database = database_returning_job(job);
    database
        .expect_update_job()
        .withf(|_, update| update.status == Some(JobStatus::InProgress) && update.attempt_count == Some(1))
        .times(1)
        .returning(|job, update| Ok(apply_updates(job, &update)));
    database
        .expect_update_job()
        .withf(|_, update| update.status == Some(JobStatus::Succeeded) && update.result == Some(json!({"ok": true})))
        .times(1)
        .returning(|job, update| Ok(apply_updates(job, &update)));

    let mut executor = MockJobExecutor::new();
    executor.expect_execute().times(1).returning(|_| Ok(json!({"ok": true})));

    let config = TestConfigBuilder::new().with_database(database).with_executor(executor).build();

    let disposition = JobHandlerService::process_job(job_id, config).await.unwrap();
    assert_eq!(disposition, DeliveryDisposition::Acknowledge);
}

/// Redelivering a message for a job that already reached a terminal state
/// must neither mutate the job nor re-execute the body.
#[rstest]
#[case::succeeded(JobStatus::Succeeded)]
#[case::failed(JobStatus::Failed)]
#[tokio::test]
async fn test_redelivery_of_terminal_job_is_discarded(#[case] status: JobStatus) {
    let job = build_job_item(status, 1);
    let job_id = job.id;

    let database = database_returning_job(job);
    let mut executor = MockJobExecutor::new();
    executor.expect_execute().times(0);

    let config = TestConfigBuilder::new().with_database(database).with_executor(executor).build();

    let disposition = JobHandlerService::process_job(job_id, config).await.unwrap();
    assert_eq!(disposition, DeliveryDisposition::Acknowledge);
}

/// The store is authoritative: a delivery referencing a job the store no
/// longer knows is discarded, not retried.
#[tokio::test]
async fn test_delivery_for_unknown_job_is_discarded() {
    let job_id = Uuid::new_v4();
    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().with(eq(job_id)).times(1).returning(|_| Ok(None));

    let config = TestConfigBuilder::new().with_database(database).build();

    let disposition = JobHandlerService::process_job(job_id, config).await.unwrap();
    assert_eq!(disposition, DeliveryDisposition::Acknowledge);
}

/// A concurrent redelivery to two slots is resolved by the optimistic
/// version check: the loser aborts its delivery as a no-op.
#[tokio::test]
async fn test_losing_the_claim_race_aborts_as_noop() {
    let job = build_job_item(JobStatus::Pending, 0);
    let job_id = job.id;

    let mut database = database_returning_job(job);
    database
        .expect_update_job()
        .times(1)
        .returning(|_, _| Err(DatabaseError::UpdateFailed("version is stale".to_string())));

    let mut executor = MockJobExecutor::new();
    executor.expect_execute().times(0);

    let config = TestConfigBuilder::new().with_database(database).with_executor(executor).build();

    let disposition = JobHandlerService::process_job(job_id, config).await.unwrap();
    assert_eq!(disposition, DeliveryDisposition::Acknowledge);
}

#[tokio::test]
async fn test_failed_attempt_under_budget_requeues() {
    let job = build_job_item(JobStatus::Pending, 0);
    let job_id = job.id;

    let mut database = database_returning_job(job);
    database
        .expect_update_job()
        .withf(|_, update| update.status == Some(JobStatus::InProgress) && update.attempt_count == Some(1))
        .times(1)
        .returning(|job, update| Ok(apply_updates(job, &update)));
    database
        .expect_update_job()
        .withf(|_, update| {
            update.status == Some(JobStatus::Pending)
                && update.failure_reason.as_deref().is_some_and(|r| r.contains("Attempt 1 failed"))
        })
        .times(1)
        .returning(|job, update| Ok(apply_updates(job, &update)));

    let mut executor = MockJobExecutor::new();
    executor
        .expect_execute()
        .times(1)
        .returning(|_| Err(ExecutorError::ExecutionRejected { status: 500, body: "boom".to_string() }));

    let config = TestConfigBuilder::new().with_database(database).with_executor(executor).build();

    let disposition = JobHandlerService::process_job(job_id, config).await.unwrap();
    assert_eq!(disposition, DeliveryDisposition::Requeue);
}

/// With a budget of 3, the third failing attempt is terminal: the job goes
/// to `failed` and the delivery is acknowledged so no fourth attempt runs.
#[tokio::test]
async fn test_failed_attempt_at_budget_finalizes_job() {
    let job = build_job_item(JobStatus::Pending, 2);
    let job_id = job.id;

    let mut database = database_returning_job(job);
    database
        .expect_update_job()
        .withf(|_, update| update.status == Some(JobStatus::InProgress) && update.attempt_count == Some(3))
        .times(1)
        .returning(|job, update| Ok(apply_updates(job, &update)));
    database
        .expect_update_job()
        .withf(|_, update| {
            update.status == Some(JobStatus::Failed)
                && update.failure_reason.as_deref().is_some_and(|r| r.contains("Attempt 3 failed"))
        })
        .times(1)
        .returning(|job, update| Ok(apply_updates(job, &update)));

    let mut executor = MockJobExecutor::new();
    executor
        .expect_execute()
        .times(1)
        .returning(|_| Err(ExecutorError::ExecutionRejected { status: 500, body: "boom".to_string() }));

    let config = TestConfigBuilder::new().with_database(database).with_executor(executor).build();

    let disposition = JobHandlerService::process_job(job_id, config).await.unwrap();
    assert_eq!(disposition, DeliveryDisposition::Acknowledge);
}

/// A slot that crashed after claiming leaves the job `in_progress` and the
/// message unacked; the redelivered message is processed from scratch and
/// the attempt count reflects both started attempts.
#[tokio::test]
async fn test_redelivery_of_in_progress_job_reexecutes_from_scratch() {
    let job = build_job_item(JobStatus::InProgress, 1);
    let job_id = job.id;

    let mut database = database_returning_job(job);
    database
        .expect_update_job()
        .withf(|_, update| update.status == Some(JobStatus::InProgress) && update.attempt_count == Some(2))
        .times(1)
        .returning(|job, update| Ok(apply_updates(job, &update)));
    database
        .expect_update_job()
        .withf(|_, update| update.status == Some(JobStatus::Succeeded))
        .times(1)
        .returning(|job, update| Ok(apply_updates(job, &update)));

    let mut executor = MockJobExecutor::new();
    executor.expect_execute().times(1).returning(|_| Ok(json!({"ok": true})));

    let config = TestConfigBuilder::new().with_database(database).with_executor(executor).build();

    let disposition = JobHandlerService::process_job(job_id, config).await.unwrap();
    assert_eq!(disposition, DeliveryDisposition::Acknowledge);
}

#[tokio::test]
async fn test_dead_lettered_job_is_finalized_as_failed() {
    let job = build_job_item(JobStatus::Pending, 2);
    let job_id = job.id;

    let mut database = database_returning_job(job);
    database
        .expect_update_job()
        .withf(|_, update| {
            update.status == Some(JobStatus::Failed)
                && update.failure_reason.as_deref().is_some_and(|r| r.contains("dead-lettered"))
        })
        .times(1)
        .returning(|job, update| Ok(apply_updates(job, &update)));

    let config = TestConfigBuilder::new().with_database(database).build();

    let disposition = JobHandlerService::handle_job_failure(job_id, config).await.unwrap();
    assert_eq!(disposition, DeliveryDisposition::Acknowledge);
}

/// A dead-letter message for an already-terminal job is a duplicate from
/// the broker; it is dropped without another store write.
#[tokio::test]
async fn test_dead_lettered_terminal_job_is_skipped() {
    let job = build_job_item(JobStatus::Failed, 3);
    let job_id = job.id;

    let database = database_returning_job(job);
    let config = TestConfigBuilder::new().with_database(database).build();

    let disposition = JobHandlerService::handle_job_failure(job_id, config).await.unwrap();
    assert_eq!(disposition, DeliveryDisposition::Acknowledge);
}

#[tokio::test]
async fn test_webhook_is_notified_on_terminal_success() {
    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(200);
    });

    let mut job = build_job_item(JobStatus::Pending, 0);
    job.webhook_url = Some(server.url("/hook"));
    let job_id = job.id;

    let mut database = database_returning_job(job);
    database.expect_update_job().times(2).returning(|job, update| Ok(apply_updates(job, &update)));

    let mut executor = MockJobExecutor::new();
    executor.expect_execute().times(1).returning(|_| Ok(json!({"ok": true})));

    let config = TestConfigBuilder::new().with_database(database).with_executor(executor).build();

    let disposition = JobHandlerService::process_job(job_id, config).await.unwrap();
    assert_eq!(disposition, DeliveryDisposition::Acknowledge);
    hook.assert();
}
