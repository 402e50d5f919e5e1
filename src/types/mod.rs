pub mod jobs;
pub mod params;
pub mod queue;
pub mod queue_control;
