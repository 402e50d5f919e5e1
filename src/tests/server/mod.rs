use crate::core::client::database::MockDatabaseClient;
use crate::core::client::queue::MockQueueClient;
use crate::core::config::Config;
use crate::server::setup_server;
use crate::server::types::{ApiResponse, JobStatusResponse, SubmitJobResponse};
use crate::tests::config::TestConfigBuilder;
use crate::tests::utils::build_job_item;
use crate::types::jobs::job_item::JobItem;
use crate::types::jobs::types::JobStatus;
use mockall::predicate::eq;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

async fn spawn_gateway(config: Arc<Config>) -> (SocketAddr, crate::server::ServerHandle) {
    setup_server(config).await.expect("Failed to start test server")
}

/// Scenario: submit a payload, receive a job id, and an immediate status
/// read returns `pending` with no result.
#[tokio::test]
async fn test_submit_then_read_status_returns_pending() {
    let created: Arc<Mutex<Option<JobItem>>> = Arc::new(Mutex::new(None));

    let mut database = MockDatabaseClient::new();
    {
        let created = created.clone();
        database.expect_create_job().times(1).returning(move |job| {
            *created.lock().unwrap() = Some(job.clone());
            Ok(job)
        });
    }
    {
        let created = created.clone();
        database.expect_get_job_by_id().returning(move |id| {
            Ok(created.lock().unwrap().clone().filter(|job| job.id == id))
        });
    }

    let mut queue = MockQueueClient::new();
    queue.expect_send_message().times(1).returning(|_, _, _| Ok(()));

    let config = TestConfigBuilder::new().with_database(database).with_queue(queue).build();
    let (addr, _handle) = spawn_gateway(config).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{}/jobs", addr))
        .json(&json!({"payload": {"x": 1}}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    let body: ApiResponse<SubmitJobResponse> = response.json().await.unwrap();
    assert!(body.success);
    let job_id = body.data.unwrap().job_id;

    let response = client.get(format!("http://{}/jobs/{}", addr, job_id)).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let body: ApiResponse<JobStatusResponse> = response.json().await.unwrap();
    let status = body.data.unwrap();
    assert_eq!(status.status, JobStatus::Pending);
    assert_eq!(status.job_id, job_id);
    assert!(status.result.is_none());
    assert_eq!(status.attempt_count, 0);
}

#[tokio::test]
async fn test_submit_rejects_malformed_payload_with_400() {
    // Strict mocks: a rejected submission must not reach store or broker.
    let config = TestConfigBuilder::new().build();
    let (addr, _handle) = spawn_gateway(config).await;

    let response = reqwest::Client::new()
        .post(format!("http://{}/jobs", addr))
        .json(&json!({"payload": "not an object"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: ApiResponse<()> = response.json().await.unwrap();
    assert!(!body.success);
}

#[tokio::test]
async fn test_get_unknown_job_returns_404() {
    let job_id = Uuid::new_v4();
    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().with(eq(job_id)).times(1).returning(|_| Ok(None));

    let config = TestConfigBuilder::new().with_database(database).build();
    let (addr, _handle) = spawn_gateway(config).await;

    let response = reqwest::Client::new().get(format!("http://{}/jobs/{}", addr, job_id)).send().await.unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_get_with_malformed_id_returns_400() {
    let config = TestConfigBuilder::new().build();
    let (addr, _handle) = spawn_gateway(config).await;

    let response =
        reqwest::Client::new().get(format!("http://{}/jobs/not-a-uuid", addr)).send().await.unwrap();
    assert_eq!(response.status(), 400);
}

/// Scenario: a worker finished the job; the status read surfaces the
/// result payload.
#[tokio::test]
async fn test_read_status_of_succeeded_job_includes_result() {
    let mut job = build_job_item(JobStatus::Succeeded, 1);
    job.result = Some(json!({"vectors": 5}));
    let job_id = job.id;

    let mut database = MockDatabaseClient::new();
    database.expect_get_job_by_id().with(eq(job_id)).times(1).returning(move |_| Ok(Some(job.clone())));

    let config = TestConfigBuilder::new().with_database(database).build();
    let (addr, _handle) = spawn_gateway(config).await;

    let response = reqwest::Client::new().get(format!("http://{}/jobs/{}", addr, job_id)).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let body: ApiResponse<JobStatusResponse> = response.json().await.unwrap();
    let status = body.data.unwrap();
    assert_eq!(status.status, JobStatus::Succeeded);
    assert_eq!(status.result, Some(json!({"vectors": 5})));
}
