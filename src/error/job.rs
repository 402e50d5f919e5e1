use crate::core::client::database::DatabaseError;
use crate::core::client::executor::ExecutorError;
use crate::core::client::queue::QueueError;
use crate::error::other::OtherError;
use crate::types::jobs::types::JobStatus;
use thiserror::Error;
use uuid::Uuid;

pub type JobResult<T> = Result<T, JobError>;

/// Error types for job-related operations in the pipeline
#[derive(Error, Debug)]
pub enum JobError {
    /// Indicates a submission that was rejected before touching the store
    /// or the broker
    #[error("Invalid job payload: {0}")]
    InvalidJobPayload(String),

    /// Indicates an invalid job ID was provided
    #[error("Job id {id:?} is invalid.")]
    InvalidId { id: String },

    /// Indicates the requested job could not be found
    #[error("Failed to find job with id {id:?}")]
    JobNotFound { id: Uuid },

    /// Indicates the job is in an invalid status for the requested operation
    #[error("Invalid status {job_status:?} for job with id {id:?}. Cannot process.")]
    InvalidStatus { id: Uuid, job_status: JobStatus },

    #[error("Failed to serialize data: {0}")]
    FailedToSerializeData(#[from] serde_json::Error),

    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    /// Wraps errors from the job-body executor; governed by the retry budget
    #[error("Execution error: {0}")]
    ExecutionError(#[from] ExecutorError),

    /// Wraps general errors that don't fit other categories
    #[error("Other error: {0}")]
    Other(#[from] OtherError),
}
