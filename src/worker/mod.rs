pub mod controller;
pub mod event_handler;
pub mod parser;
pub mod reconciler;
pub mod service;
pub mod traits;

use controller::worker_controller::WorkerController;

use crate::{core::config::Config, ConveyorResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Initializes the worker pool with the provided configuration.
///
/// Starts the configured number of worker slots against the processing
/// queue, one slot against the dead-letter queue, and the reconciliation
/// sweep. All of them run in the background; the returned controller is
/// kept for shutdown management.
pub async fn initialize_worker(config: Arc<Config>) -> ConveyorResult<WorkerController> {
    let controller = WorkerController::new(config, CancellationToken::new());
    controller.start()?;
    info!("Workers initialized and started successfully");
    Ok(controller)
}
