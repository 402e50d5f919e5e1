use clap::Args;
use url::Url;

fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if value == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(value)
}

#[derive(Debug, Clone, Args)]
pub struct ServiceCliArgs {
    /// Number of worker slots consuming the processing queue. Each slot
    /// holds at most one delivery in flight.
    #[arg(env = "CONVEYOR_WORKER_SLOTS", long, default_value = "4", value_parser = parse_positive_usize)]
    pub worker_slots: usize,

    /// Maximum execution attempts before a job is marked terminally failed.
    #[arg(env = "CONVEYOR_RETRY_BUDGET", long, default_value = "3")]
    pub retry_budget: i32,

    /// Endpoint the job body is delegated to.
    #[arg(env = "CONVEYOR_EXECUTOR_URL", long, default_value = "http://localhost:8000/execute")]
    pub executor_url: Url,

    /// Per-execution request timeout in seconds.
    #[arg(env = "CONVEYOR_EXECUTOR_TIMEOUT_SECONDS", long, default_value = "300")]
    pub executor_timeout_seconds: u64,

    /// Age in seconds after which a non-terminal job is reported by the
    /// reconciliation sweep.
    #[arg(env = "CONVEYOR_STALE_JOB_THRESHOLD_SECONDS", long, default_value = "900")]
    pub stale_job_threshold_seconds: u64,

    /// Interval in seconds between reconciliation sweeps.
    #[arg(env = "CONVEYOR_RECONCILIATION_INTERVAL_SECONDS", long, default_value = "300")]
    pub reconciliation_interval_seconds: u64,
}
