use crate::core::config::Config;
use crate::types::jobs::types::JobStatus;
use crate::utils::metrics::CONVEYOR_METRICS;
use opentelemetry::KeyValue;
use std::sync::Arc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const STALE_JOBS_SWEEP_LIMIT: i64 = 100;

/// Periodic consistency sweep. A job sitting in `pending` or `in_progress`
/// past the staleness threshold while no delivery settles it points at a
/// store/broker mismatch (e.g. a lost work message). The sweep cannot
/// repair that inline; it surfaces the state through logs and a metric so
/// an operator or an external reconciler can act on it.
pub struct Reconciler {
    config: Arc<Config>,
    cancellation_token: CancellationToken,
}

impl Reconciler {
    pub fn new(config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        Self { config, cancellation_token }
    }

    pub async fn run(&self) {
        let interval = self.config.service_params().reconciliation_interval;
        info!(interval_secs = interval.as_secs(), "Starting reconciliation sweep");

        loop {
            tokio::select! {
                _ = self.cancellation_token.cancelled() => {
                    info!("Reconciliation sweep shutting down");
                    break;
                }
                _ = sleep(interval) => self.sweep().await,
            }
        }
    }

    pub(crate) async fn sweep(&self) {
        let threshold = self.config.service_params().stale_job_threshold;

        for status in [JobStatus::Pending, JobStatus::InProgress] {
            match self.config.database().get_stale_jobs(status, threshold, STALE_JOBS_SWEEP_LIMIT).await {
                Ok(jobs) => {
                    if jobs.is_empty() {
                        continue;
                    }
                    CONVEYOR_METRICS
                        .stale_jobs_detected
                        .add(jobs.len() as f64, &[KeyValue::new("job_status", status.to_string())]);
                    for job in jobs {
                        warn!(
                            job_id = %job.id,
                            status = %status,
                            updated_at = %job.updated_at,
                            attempt = job.attempt_count,
                            "Job stuck past staleness threshold with no settling delivery"
                        );
                    }
                }
                Err(e) => {
                    error!(status = %status, error = %e, "Failed to query stale jobs");
                }
            }
        }
    }
}
