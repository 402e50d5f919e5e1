pub mod error;
pub mod http;

use crate::types::jobs::job_item::JobItem;
use async_trait::async_trait;

pub use error::ExecutorError;

/// The job-body seam. The pipeline never interprets the payload; it hands
/// the job to an executor and persists whatever result comes back. A failed
/// execution is charged against the job's retry budget.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobExecutor: Send + Sync {
    async fn execute(&self, job: &JobItem) -> Result<serde_json::Value, ExecutorError>;
}
