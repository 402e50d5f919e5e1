use crate::cli::queue::QueueCliArgs;
use url::Url;

/// Connection parameters for the broker.
#[derive(Debug, Clone)]
pub struct QueueArgs {
    /// Queue name template; `{}` is replaced by the queue type
    pub queue_template: String,
    /// AWS region override; falls back to the ambient AWS configuration
    pub aws_region: Option<String>,
    /// Custom SQS endpoint (SQS-compatible brokers, local stacks)
    pub aws_endpoint_url: Option<Url>,
}

impl From<QueueCliArgs> for QueueArgs {
    fn from(args: QueueCliArgs) -> Self {
        Self {
            queue_template: args.queue_identifier,
            aws_region: args.aws_region,
            aws_endpoint_url: args.aws_endpoint_url,
        }
    }
}
