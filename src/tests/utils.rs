use crate::types::jobs::job_item::JobItem;
use crate::types::jobs::job_updates::JobItemUpdates;
use crate::types::jobs::types::JobStatus;
use chrono::{SubsecRound, Utc};
use serde_json::json;
use uuid::Uuid;

pub fn build_job_item(status: JobStatus, attempt_count: i32) -> JobItem {
    let now = Utc::now().round_subsecs(0);
    JobItem {
        id: Uuid::new_v4(),
        status,
        payload: json!({"x": 1}),
        result: None,
        failure_reason: None,
        attempt_count,
        webhook_url: None,
        version: attempt_count,
        created_at: now,
        updated_at: now,
    }
}

/// Mirror of what the store does with an update: apply the set fields, bump
/// the version. Keeps mock return values faithful to the real client.
pub fn apply_updates(job: &JobItem, updates: &JobItemUpdates) -> JobItem {
    let mut updated = job.clone();
    if let Some(status) = updates.status {
        updated.status = status;
    }
    if let Some(result) = &updates.result {
        updated.result = Some(result.clone());
    }
    if let Some(reason) = &updates.failure_reason {
        updated.failure_reason = Some(reason.clone());
    }
    if let Some(attempt_count) = updates.attempt_count {
        updated.attempt_count = attempt_count;
    }
    updated.version += 1;
    updated.updated_at = Utc::now().round_subsecs(0);
    updated
}
