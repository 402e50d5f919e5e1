use crate::core::config::Config;
use crate::types::queue::QueueType;
use crate::worker::controller::event_worker::EventWorker;
use crate::worker::reconciler::Reconciler;
use crate::{ConveyorError, ConveyorResult};

use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Supervises the worker slots, the dead-letter consumer and the
/// reconciliation sweep. Slots share nothing in memory; the controller only
/// owns their join handles and the shutdown token.
#[derive(Clone)]
pub struct WorkerController {
    config: Arc<Config>,
    handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
    cancellation_token: CancellationToken,
}

impl WorkerController {
    pub fn new(config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        Self { config, handles: Arc::new(Mutex::new(Vec::new())), cancellation_token }
    }

    /// start - Spawn every background task of the worker pool:
    /// * `worker_slots` independent slots on the processing queue
    /// * one slot draining the dead-letter queue
    /// * the reconciliation sweep
    pub fn start(&self) -> ConveyorResult<()> {
        let worker_slots = self.config.service_params().worker_slots;
        info!(worker_slots, "Starting worker pool");

        let mut spawned = Vec::new();
        for slot in 0..worker_slots {
            spawned.push(self.spawn_worker(QueueType::JobProcessing, slot));
        }
        spawned.push(self.spawn_worker(QueueType::JobHandleFailure, 0));

        let reconciler = Reconciler::new(self.config.clone(), self.cancellation_token.child_token());
        spawned.push(tokio::spawn(async move { reconciler.run().await }));

        let mut handles =
            self.handles.lock().map_err(|e| ConveyorError::ServerError(format!("worker handle lock poisoned: {e}")))?;
        handles.extend(spawned);
        Ok(())
    }

    fn spawn_worker(&self, queue_type: QueueType, slot: usize) -> JoinHandle<()> {
        let worker = EventWorker::new(queue_type, slot, self.config.clone(), self.cancellation_token.child_token());
        tokio::spawn(async move { worker.run().await })
    }

    /// shutdown - Trigger a graceful shutdown: signal every task, then wait
    /// for slots to finish their in-flight delivery and exit cleanly.
    pub async fn shutdown(&self) -> ConveyorResult<()> {
        info!("Initiating worker pool graceful shutdown");
        self.cancellation_token.cancel();

        let handles: Vec<JoinHandle<()>> = {
            let mut guard = self
                .handles
                .lock()
                .map_err(|e| ConveyorError::ServerError(format!("worker handle lock poisoned: {e}")))?;
            guard.drain(..).collect()
        };

        for result in futures::future::join_all(handles).await {
            if let Err(e) = result {
                error!(error = %e, "Worker task panicked or was cancelled");
            }
        }

        info!("Worker pool shutdown completed");
        Ok(())
    }
}
