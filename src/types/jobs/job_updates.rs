use crate::types::jobs::types::JobStatus;
use serde_json::Value;

/// Defining a structure that contains the changes to be made in the job
/// record; id and created_at are not allowed to be changed.
// version and updated_at are always bumped when this object updates the job
#[derive(Debug, Clone, Default)]
pub struct JobItemUpdates {
    pub status: Option<JobStatus>,
    pub result: Option<Value>,
    pub failure_reason: Option<String>,
    pub attempt_count: Option<i32>,
}

/// implements only needed singular changes
impl JobItemUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_status(mut self, status: JobStatus) -> JobItemUpdates {
        self.status = Some(status);
        self
    }

    pub fn update_result(mut self, result: Value) -> JobItemUpdates {
        self.result = Some(result);
        self
    }

    pub fn update_failure_reason(mut self, reason: String) -> JobItemUpdates {
        self.failure_reason = Some(reason);
        self
    }

    pub fn update_attempt_count(mut self, attempt_count: i32) -> JobItemUpdates {
        self.attempt_count = Some(attempt_count);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.result.is_none() && self.failure_reason.is_none() && self.attempt_count.is_none()
    }

    pub fn build(self) -> JobItemUpdates {
        self
    }
}
