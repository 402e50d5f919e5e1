use crate::error::other::OtherError;
use thiserror::Error;
use uuid::Uuid;

pub type EventSystemResult<T> = Result<T, EventSystemError>;

/// Errors raised while consuming and dispatching broker deliveries
#[derive(Error, Debug)]
pub enum ConsumptionError {
    #[error("Failed to consume message from queue, error {error_msg:?}")]
    FailedToConsumeFromQueue { error_msg: String },

    #[error("Failed to acknowledge message, error {0}")]
    FailedToAcknowledgeMessage(String),

    #[error("Failed to handle job with id {job_id:?}, error {error_msg:?}")]
    FailedToHandleJob { job_id: Uuid, error_msg: String },

    #[error("Empty or unparsable message payload: {0}")]
    PayloadError(String),

    #[error("Other error: {0}")]
    Other(#[from] OtherError),
}

#[derive(Error, Debug)]
pub enum EventSystemError {
    #[error("ConsumptionError: {0}")]
    ConsumptionError(#[from] ConsumptionError),
}
