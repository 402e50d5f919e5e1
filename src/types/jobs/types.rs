use serde::{Deserialize, Serialize};

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobStatus {
    /// An acknowledgement that the job has been accepted by the gateway
    /// and a work message has been published for it
    Pending,
    /// A worker slot holds the delivery for this job and is executing the
    /// job body
    InProgress,
    /// The job body completed and the result payload is persisted
    Succeeded,
    /// The retry budget was exhausted or the work message was dead-lettered
    Failed,
}

impl JobStatus {
    /// Terminal states never regress; a delivery for a terminal job is
    /// discarded without re-executing the job body.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trips_through_display() {
        for status in [JobStatus::Pending, JobStatus::InProgress, JobStatus::Succeeded, JobStatus::Failed] {
            assert_eq!(JobStatus::from_str(&status.to_string()).unwrap(), status);
        }
        assert_eq!(JobStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn test_terminal_states() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::InProgress.is_terminal());
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&JobStatus::InProgress).unwrap(), "\"in_progress\"");
        assert_eq!(serde_json::from_str::<JobStatus>("\"pending\"").unwrap(), JobStatus::Pending);
    }
}
