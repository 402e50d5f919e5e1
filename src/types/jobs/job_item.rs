use crate::types::jobs::types::JobStatus;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// The authoritative job record held in the store. The `version` field is an
/// optimistic-concurrency token: every mutation filters on `(id, version)`
/// and bumps it, so two workers holding concurrent deliveries of the same
/// message cannot both transition the job.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JobItem {
    /// Generated by the gateway at submission, immutable afterwards
    pub id: Uuid,
    pub status: JobStatus,
    /// Opaque input payload; the pipeline never inspects it
    pub payload: Value,
    /// Null until the job body succeeds
    pub result: Option<Value>,
    /// Reason recorded on failed attempts and terminal failure
    pub failure_reason: Option<String>,
    /// Number of execution attempts actually started
    pub attempt_count: i32,
    /// Optional callback notified once the job reaches a terminal state
    pub webhook_url: Option<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobItem {
    pub fn new(payload: Value, webhook_url: Option<String>) -> Self {
        let now = Utc::now().round_subsecs(0);
        Self {
            id: Uuid::new_v4(),
            status: JobStatus::Pending,
            payload,
            result: None,
            failure_reason: None,
            attempt_count: 0,
            webhook_url,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
