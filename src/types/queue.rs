use strum_macros::{Display, EnumIter};

#[derive(Display, Debug, Clone, PartialEq, Eq, EnumIter, Hash)]
pub enum QueueType {
    #[strum(serialize = "job_processing")]
    JobProcessing,
    #[strum(serialize = "job_handle_failure")]
    JobHandleFailure,
}
