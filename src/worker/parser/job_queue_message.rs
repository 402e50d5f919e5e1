use crate::error::event::EventSystemResult;
use crate::error::other::OtherError;
use crate::error::ConsumptionError;
use crate::worker::traits::message::MessageParser;
use chrono::{DateTime, SubsecRound, Utc};
use omniqueue::Delivery;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The work-message envelope carried by the broker. References exactly one
/// job; redelivery is a new delivery of the same message, never a new job.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JobQueueMessage {
    pub id: Uuid,
    pub enqueued_at: DateTime<Utc>,
}

impl JobQueueMessage {
    pub fn new(id: Uuid) -> Self {
        Self { id, enqueued_at: Utc::now().round_subsecs(0) }
    }

    pub fn from_slice(payload: &[u8]) -> EventSystemResult<Box<Self>> {
        let message = serde_json::from_slice::<Self>(payload)
            .map_err(|e| ConsumptionError::PayloadError(format!("Failed to parse job queue message: {e}")))?;
        Ok(Box::new(message))
    }
}

impl MessageParser for JobQueueMessage {
    fn parse_message(message: &Delivery) -> EventSystemResult<Box<Self>> {
        let payload = message
            .borrow_payload()
            .ok_or_else(|| ConsumptionError::Other(OtherError::from("Empty payload".to_string())))?;
        Self::from_slice(payload)
    }
}
