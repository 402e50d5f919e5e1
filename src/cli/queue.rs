use clap::Args;
use url::Url;

/// Parameters used to configure the broker.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct QueueCliArgs {
    /// The name template for the queues.
    /// {} will be replaced by the queue type,
    /// i.e. for the processing queue: conveyor_job_processing_queue
    #[arg(env = "CONVEYOR_QUEUE_IDENTIFIER", long, default_value = "conveyor_{}_queue")]
    pub queue_identifier: String,

    /// AWS region for the broker; falls back to the ambient AWS configuration.
    #[arg(env = "CONVEYOR_AWS_REGION", long)]
    pub aws_region: Option<String>,

    /// Custom SQS endpoint, for SQS-compatible brokers and local stacks.
    #[arg(env = "CONVEYOR_AWS_ENDPOINT_URL", long)]
    pub aws_endpoint_url: Option<Url>,
}
