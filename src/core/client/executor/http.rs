use crate::core::client::executor::{ExecutorError, JobExecutor};
use crate::types::jobs::job_item::JobItem;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Executor that delegates the job body to an external HTTP collaborator.
/// The payload is POSTed as-is; a 2xx response body is taken as the result
/// payload, anything else counts as a failed attempt.
#[derive(Clone, Debug)]
pub struct HttpJobExecutor {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpJobExecutor {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, ExecutorError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl JobExecutor for HttpJobExecutor {
    async fn execute(&self, job: &JobItem) -> Result<Value, ExecutorError> {
        debug!(job_id = %job.id, endpoint = %self.endpoint, "Delegating job body to executor");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&json!({ "job_id": job.id, "payload": job.payload }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExecutorError::ExecutionRejected { status: status.as_u16(), body });
        }

        response.json::<Value>().await.map_err(|e| ExecutorError::InvalidResponse(e.to_string()))
    }
}
