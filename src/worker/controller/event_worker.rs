use crate::core::config::Config;
use crate::error::event::EventSystemResult;
use crate::error::ConsumptionError;
use crate::types::queue::QueueType;
use crate::worker::event_handler::service::{DeliveryDisposition, JobHandlerService};
use crate::worker::parser::job_queue_message::JobQueueMessage;
use crate::worker::traits::message::MessageParser;
use omniqueue::Delivery;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, Instrument};

const QUEUE_GET_MESSAGE_WAIT_TIMEOUT: Duration = Duration::from_secs(30);
const QUEUE_NO_MESSAGE_SLEEP_DURATION: Duration = Duration::from_millis(1000);
const QUEUE_ERROR_SLEEP_DURATION: Duration = Duration::from_secs(1);

/// A single worker slot: a sequential receive → process → ack/nack loop
/// with at most one delivery in flight. Pool concurrency comes from
/// running several slots, never from multiplexing one.
#[derive(Clone)]
pub struct EventWorker {
    config: Arc<Config>,
    queue_type: QueueType,
    slot: usize,
    cancellation_token: tokio_util::sync::CancellationToken,
}

impl EventWorker {
    pub fn new(
        queue_type: QueueType,
        slot: usize,
        config: Arc<Config>,
        cancellation_token: tokio_util::sync::CancellationToken,
    ) -> Self {
        Self { config, queue_type, slot, cancellation_token }
    }

    /// Check if shutdown has been requested (non-blocking)
    pub fn is_shutdown_requested(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// get_message - Get the next message from the queue
    /// Blocks until a message is available (bounded by a wait timeout so
    /// the loop can observe shutdown) or an error occurs.
    pub async fn get_message(&self) -> EventSystemResult<Option<Delivery>> {
        let start = Instant::now();

        loop {
            match self.config.queue().consume_message_from_queue(self.queue_type.clone()).await {
                Ok(delivery) => return Ok(Some(delivery)),
                Err(e) if e.is_no_data() => {
                    if start.elapsed() > QUEUE_GET_MESSAGE_WAIT_TIMEOUT {
                        return Ok(None);
                    }
                    sleep(QUEUE_NO_MESSAGE_SLEEP_DURATION).await;
                    continue;
                }
                Err(e) => {
                    error!(queue = ?self.queue_type, error = %e, "Failed to consume message from queue");
                    return Err(ConsumptionError::FailedToConsumeFromQueue { error_msg: e.to_string() })?;
                }
            }
        }
    }

    /// handle_message - Dispatch the parsed work message based on the queue
    /// this slot consumes: the processing queue executes the job, the
    /// dead-letter queue finalizes it.
    async fn handle_message(&self, message: &JobQueueMessage) -> EventSystemResult<DeliveryDisposition> {
        let result = match self.queue_type {
            QueueType::JobProcessing => JobHandlerService::process_job(message.id, self.config.clone()).await,
            QueueType::JobHandleFailure => JobHandlerService::handle_job_failure(message.id, self.config.clone()).await,
        };
        result.map_err(|e| {
            ConsumptionError::FailedToHandleJob { job_id: message.id, error_msg: e.to_string() }.into()
        })
    }

    /// post_processing - Acknowledge or reject the delivery based on the
    /// handling result. Handling errors (infrastructure trouble, not job
    /// failures) leave the message unacked-equivalent via nack so the
    /// broker redelivers it.
    async fn post_processing(
        &self,
        result: EventSystemResult<DeliveryDisposition>,
        message: Delivery,
        parsed_message: &JobQueueMessage,
    ) -> EventSystemResult<()> {
        match result {
            Ok(DeliveryDisposition::Acknowledge) => {
                message.ack().await.map_err(|e| ConsumptionError::FailedToAcknowledgeMessage(e.0.to_string()))?
            }
            Ok(DeliveryDisposition::Requeue) => {
                debug!(job_id = %parsed_message.id, "Rejecting delivery for broker redelivery");
                message.nack().await.map_err(|e| ConsumptionError::FailedToAcknowledgeMessage(e.0.to_string()))?
            }
            Err(ref error) => {
                error!(job_id = %parsed_message.id, error = %error, "Failed to handle delivery, leaving it to the broker");
                message.nack().await.map_err(|e| ConsumptionError::FailedToAcknowledgeMessage(e.0.to_string()))?
            }
        }
        Ok(())
    }

    /// process_message - Process one delivery end to end under a dedicated
    /// span, then settle it with the broker.
    async fn process_message(&self, message: Delivery, parsed_message: JobQueueMessage) -> EventSystemResult<()> {
        let span = tracing::info_span!(
            "job_processing",
            job_id = %parsed_message.id,
            queue = %self.queue_type,
            slot = self.slot,
        );
        async move {
            let result = self.handle_message(&parsed_message).await;
            self.post_processing(result, message, &parsed_message).await
        }
        .instrument(span)
        .await
    }

    /// run - Run the worker slot until shutdown is requested.
    ///
    /// # Notes
    /// * Job-level failures are settled against the job record and never
    ///   stop the slot
    /// * The loop sleeps briefly when the queue is empty or erroring to
    ///   avoid a tight spin
    pub async fn run(&self) {
        info!(queue = %self.queue_type, slot = self.slot, "Starting worker slot");

        loop {
            if self.is_shutdown_requested() {
                info!(queue = %self.queue_type, slot = self.slot, "Shutdown requested, stopping message processing");
                break;
            }

            tokio::select! {
                biased;

                _ = self.cancellation_token.cancelled() => {
                    info!(queue = %self.queue_type, slot = self.slot, "Shutdown signal received, breaking from worker loop");
                    break;
                }

                message_result = self.get_message() => {
                    match message_result {
                        Ok(Some(message)) => match JobQueueMessage::parse_message(&message) {
                            Ok(parsed_message) => {
                                debug!(queue = %self.queue_type, job_id = %parsed_message.id, "Received message from queue");
                                if let Err(e) = self.process_message(message, *parsed_message).await {
                                    error!(queue = %self.queue_type, error = %e, "Failed to settle delivery");
                                }
                            }
                            Err(e) => {
                                error!(queue = %self.queue_type, error = %e, "Received malformed message, rejecting");
                                if let Err(nack_error) = message.nack().await {
                                    error!(error = %nack_error.0, "Failed to reject malformed message");
                                }
                            }
                        },
                        Ok(None) => sleep(QUEUE_NO_MESSAGE_SLEEP_DURATION).await,
                        Err(e) => {
                            error!(queue = %self.queue_type, error = %e, "Error receiving message");
                            sleep(QUEUE_ERROR_SLEEP_DURATION).await;
                        }
                    }
                }
            }
        }

        info!(queue = %self.queue_type, slot = self.slot, "Worker slot shutdown complete");
    }
}
