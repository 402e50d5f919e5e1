pub mod event;
pub mod job;
pub mod other;

use crate::core::client::database::DatabaseError;
use crate::core::client::executor::ExecutorError;
use crate::core::client::queue::QueueError;
use crate::error::event::EventSystemError;
use thiserror::Error;

pub use event::ConsumptionError;

/// Result type for pipeline operations
pub type ConveyorResult<T> = Result<T, ConveyorError>;

/// Error types for the pipeline binary and its components
#[derive(Error, Debug)]
pub enum ConveyorError {
    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Executor error: {0}")]
    ExecutorError(#[from] ExecutorError),

    #[error("Event system error: {0}")]
    EventSystemError(#[from] EventSystemError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Resource Setup error
    #[error("Resource setup error: {0}")]
    ResourceSetupError(String),

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Conveyor error: {0}")]
    AnyhowError(#[from] anyhow::Error),
}
