use once_cell::sync::Lazy;
use opentelemetry::global;
use opentelemetry::metrics::{Counter, Histogram, Meter};

pub static CONVEYOR_METRICS: Lazy<ConveyorMetrics> = Lazy::new(ConveyorMetrics::register);

pub struct ConveyorMetrics {
    pub jobs_submitted: Counter<f64>,
    pub successful_job_operations: Counter<f64>,
    pub failed_job_operations: Counter<f64>,
    pub failed_jobs: Counter<f64>,
    pub stale_jobs_detected: Counter<f64>,
    pub jobs_response_time: Histogram<f64>,
    pub db_calls_response_time: Histogram<f64>,
}

impl ConveyorMetrics {
    pub fn register() -> Self {
        let meter: Meter = global::meter("crates.conveyor.opentelemetry");

        let jobs_submitted = meter
            .f64_counter("jobs_submitted")
            .with_description("Count of jobs accepted by the gateway")
            .with_unit("jobs")
            .build();

        let successful_job_operations = meter
            .f64_counter("successful_job_operations")
            .with_description("Count of successful job operations over time")
            .with_unit("jobs")
            .build();

        let failed_job_operations = meter
            .f64_counter("failed_job_operations")
            .with_description("Count of failed job operations over time")
            .with_unit("jobs")
            .build();

        let failed_jobs = meter
            .f64_counter("failed_jobs")
            .with_description("Count of jobs reaching terminal failure")
            .with_unit("jobs")
            .build();

        let stale_jobs_detected = meter
            .f64_counter("stale_jobs_detected")
            .with_description("Count of jobs found stuck in a non-terminal status by the reconciliation sweep")
            .with_unit("jobs")
            .build();

        let jobs_response_time = meter
            .f64_histogram("jobs_response_time")
            .with_description("Response time of job operations over time")
            .with_unit("s")
            .build();

        let db_calls_response_time = meter
            .f64_histogram("db_calls_response_time")
            .with_description("Response time of DB calls over time")
            .with_unit("s")
            .build();

        Self {
            jobs_submitted,
            successful_job_operations,
            failed_job_operations,
            failed_jobs,
            stale_jobs_detected,
            jobs_response_time,
            db_calls_response_time,
        }
    }
}
