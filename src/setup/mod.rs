use crate::cli::SetupCmd;
use crate::core::client::database::postgres::PostgresClient;
use crate::core::client::database::DatabaseClient;
use crate::core::client::queue::sqs::{load_sdk_config, SQS};
use crate::types::params::{DatabaseArgs, QueueArgs};
use crate::types::queue_control::QUEUES;
use crate::{ConveyorError, ConveyorResult};
use aws_sdk_sqs::types::QueueAttributeName;
use std::collections::HashMap;
use tracing::info;

/// One-shot, idempotent initialization of everything the gateway and the
/// workers depend on: the store schema and the broker queues. Safe to run
/// against an already initialized deployment; never destructive.
pub async fn setup(setup_cmd: &SetupCmd) -> ConveyorResult<()> {
    let database_args = DatabaseArgs::from(setup_cmd.database_args.clone());
    let queue_args = QueueArgs::from(setup_cmd.queue_args.clone());

    info!("Setting up resources for the pipeline...");

    let database = PostgresClient::new(&database_args).await?;
    database.ensure_schema().await?;
    info!("Store schema ensured");

    let sdk_config = load_sdk_config(&queue_args).await;
    let sqs = SQS::new(&sdk_config, &queue_args);
    setup_queues(&sqs).await?;

    info!("Setup completed");
    Ok(())
}

/// Create-if-absent provisioning for every queue in the registry, wiring
/// the dead-letter redrive policy where one is configured. The DLQ is
/// created (or found) before its parent so the redrive policy can name its
/// ARN.
async fn setup_queues(sqs: &SQS) -> ConveyorResult<()> {
    for (queue_type, queue) in QUEUES.iter() {
        let queue_name = sqs.get_queue_name(queue_type);

        if sqs.check_if_exists(&queue_name).await? {
            info!(queue = %queue_type, "Queue already exists, skipping");
            continue;
        }

        let mut attributes = HashMap::new();
        attributes.insert(QueueAttributeName::VisibilityTimeout, queue.visibility_timeout.to_string());

        if let Some(dlq_config) = &queue.dlq_config {
            let dlq_name = sqs.get_queue_name(&dlq_config.dlq_name);
            let dlq_url = if sqs.check_if_exists(&dlq_name).await? {
                sqs.get_queue_url_from_client(&dlq_name).await?
            } else {
                let dlq_queue = QUEUES
                    .get(&dlq_config.dlq_name)
                    .ok_or_else(|| ConveyorError::ResourceSetupError(format!("Unknown DLQ '{}'", dlq_name)))?;
                let mut dlq_attributes = HashMap::new();
                dlq_attributes
                    .insert(QueueAttributeName::VisibilityTimeout, dlq_queue.visibility_timeout.to_string());
                let url = sqs.create_queue(&dlq_name, dlq_attributes).await?;
                info!(queue = %dlq_config.dlq_name, "DL queue created");
                url
            };

            let dlq_arn = sqs.get_queue_arn_from_url(&dlq_url).await?;
            let policy = format!(
                r#"{{"deadLetterTargetArn":"{}","maxReceiveCount":"{}"}}"#,
                dlq_arn, dlq_config.max_receive_count
            );
            attributes.insert(QueueAttributeName::RedrivePolicy, policy);
        }

        sqs.create_queue(&queue_name, attributes).await?;
        info!(queue = %queue_type, "Queue created");
    }

    Ok(())
}
