pub mod error;
pub mod sqs;

use crate::types::queue::QueueType;
use async_trait::async_trait;
use omniqueue::Delivery;
use std::time::Duration;

pub use error::QueueError;

/// Trait defining broker operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Publish a message onto the queue, optionally delayed.
    async fn send_message(&self, queue: QueueType, payload: String, delay: Option<Duration>) -> Result<(), QueueError>;

    /// Receive a single delivery from the queue. Returns a wrapped
    /// [`omniqueue::QueueError::NoData`] when the queue is empty.
    async fn consume_message_from_queue(&self, queue: QueueType) -> Result<Delivery, QueueError>;

    /// Perform a health check on the queue service
    ///
    /// Verifies the broker is reachable and the processing queue exists
    /// with the necessary permissions in place.
    async fn health_check(&self) -> Result<(), QueueError>;
}
