pub mod database;
pub mod queue;
pub mod service;

pub use database::DatabaseArgs;
pub use queue::QueueArgs;
pub use service::{ServerParams, ServiceParams};
