use crate::cli::server::ServerCliArgs;
use crate::cli::service::ServiceCliArgs;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct ServiceParams {
    /// Number of independent worker slots consuming the processing queue.
    /// Each slot holds at most one delivery in flight.
    pub worker_slots: usize,
    /// Maximum permitted execution attempts before a job is marked
    /// terminally failed
    pub retry_budget: i32,
    /// Endpoint the job body is delegated to
    pub executor_url: Url,
    /// Per-execution request timeout
    pub executor_timeout: Duration,
    /// Age after which a non-terminal job is reported by the reconciliation
    /// sweep
    pub stale_job_threshold: Duration,
    /// Cadence of the reconciliation sweep
    pub reconciliation_interval: Duration,
}

impl From<ServiceCliArgs> for ServiceParams {
    fn from(args: ServiceCliArgs) -> Self {
        Self {
            worker_slots: args.worker_slots,
            retry_budget: args.retry_budget,
            executor_url: args.executor_url,
            executor_timeout: Duration::from_secs(args.executor_timeout_seconds),
            stale_job_threshold: Duration::from_secs(args.stale_job_threshold_seconds),
            reconciliation_interval: Duration::from_secs(args.reconciliation_interval_seconds),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerParams {
    pub host: String,
    pub port: u16,
}

impl From<ServerCliArgs> for ServerParams {
    fn from(value: ServerCliArgs) -> Self {
        Self { host: value.host, port: value.port }
    }
}
