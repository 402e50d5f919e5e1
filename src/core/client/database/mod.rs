pub mod constant;
pub mod error;
pub mod postgres;

use crate::types::jobs::job_item::JobItem;
use crate::types::jobs::job_updates::JobItemUpdates;
use crate::types::jobs::types::JobStatus;
use async_trait::async_trait;
use std::time::Duration;

pub use error::DatabaseError;

/// Trait defining store operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// ensure_schema - Create the jobs relation and its indexes if absent.
    /// Idempotent and never destructive; safe against an already
    /// initialized store.
    async fn ensure_schema(&self) -> Result<(), DatabaseError>;

    /// create_job - Insert a new job record. Fails if a job with the same
    /// id already exists.
    async fn create_job(&self, job: JobItem) -> Result<JobItem, DatabaseError>;

    /// get_job_by_id - Get a job by its ID
    async fn get_job_by_id(&self, id: uuid::Uuid) -> Result<Option<JobItem>, DatabaseError>;

    /// update_job - Apply `update` to the job, filtered on the job's
    /// current `(id, version)`. Returns the updated record, or
    /// [`DatabaseError::UpdateFailed`] when the version is stale (another
    /// holder mutated the job first).
    async fn update_job(&self, current_job: &JobItem, update: JobItemUpdates) -> Result<JobItem, DatabaseError>;

    /// get_stale_jobs - Jobs sitting in `status` with no update for longer
    /// than `stale_after`. Feed for the reconciliation sweep.
    async fn get_stale_jobs(
        &self,
        status: JobStatus,
        stale_after: Duration,
        limit: i64,
    ) -> Result<Vec<JobItem>, DatabaseError>;

    /// Verify the store is reachable and the schema is in place.
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
