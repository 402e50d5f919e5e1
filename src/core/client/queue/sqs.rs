use crate::core::client::queue::{QueueClient, QueueError};
use crate::types::params::QueueArgs;
use crate::types::queue::QueueType;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::types::QueueAttributeName;
use aws_sdk_sqs::Client;
use omniqueue::backends::{SqsBackend, SqsConfig};
use omniqueue::Delivery;
use std::collections::HashMap;
use std::time::Duration;

/// Load the ambient AWS configuration, applying the region and endpoint
/// overrides from the queue parameters.
pub async fn load_sdk_config(args: &QueueArgs) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &args.aws_region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &args.aws_endpoint_url {
        loader = loader.endpoint_url(endpoint.as_str());
    }
    loader.load().await
}

#[derive(Clone, Debug)]
pub struct SQS {
    client: Client,
    queue_template: String,
}

impl SQS {
    pub fn new(aws_config: &SdkConfig, args: &QueueArgs) -> Self {
        let sqs_config_builder = aws_sdk_sqs::config::Builder::from(aws_config);
        let client = Client::from_conf(sqs_config_builder.build());
        Self { client, queue_template: args.queue_template.clone() }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// get_queue_name_from_type - Get the queue specific name from its type
    /// This function returns the queue name based on the queue type provided
    pub fn get_queue_name_from_type(template: &str, queue_type: &QueueType) -> String {
        template.replace("{}", &queue_type.to_string())
    }

    /// get_queue_name - Resolve the configured template for a queue type.
    /// The template should contain "{}" which is replaced with the queue type.
    pub fn get_queue_name(&self, queue_type: &QueueType) -> String {
        Self::get_queue_name_from_type(&self.queue_template, queue_type)
    }

    /// get_queue_url_from_client - Get the queue URL from the client
    /// This function returns the queue URL based on the queue name.
    pub async fn get_queue_url_from_client(&self, queue_name: &str) -> Result<String, QueueError> {
        Ok(self
            .client()
            .get_queue_url()
            .queue_name(queue_name)
            .send()
            .await?
            .queue_url()
            .ok_or_else(|| QueueError::FailedToGetQueueUrl(queue_name.to_string()))?
            .to_string())
    }

    /// check_if_exists - Whether a queue with this name is already present
    pub async fn check_if_exists(&self, queue_name: &str) -> Result<bool, QueueError> {
        match self.client().get_queue_url().queue_name(queue_name).send().await {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(err)) if err.err().is_queue_does_not_exist() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// create_queue - Create a new queue with the given name and attributes
    pub async fn create_queue(
        &self,
        queue_name: &str,
        attributes: HashMap<QueueAttributeName, String>,
    ) -> Result<String, QueueError> {
        let res = self
            .client()
            .create_queue()
            .queue_name(queue_name)
            .set_attributes(Some(attributes))
            .send()
            .await?;
        Ok(res.queue_url().ok_or_else(|| QueueError::FailedToGetQueueUrl(queue_name.to_string()))?.to_string())
    }

    /// get_queue_arn_from_url - Get the queue ARN from the queue URL
    /// This function returns the queue ARN based on the queue URL.
    pub async fn get_queue_arn_from_url(&self, queue_url: &str) -> Result<String, QueueError> {
        let attributes = self
            .client()
            .get_queue_attributes()
            .queue_url(queue_url)
            .attribute_names(QueueAttributeName::QueueArn)
            .send()
            .await?;

        attributes
            .attributes()
            .and_then(|attributes| attributes.get(&QueueAttributeName::QueueArn))
            .map(|arn| arn.to_string())
            .ok_or_else(|| QueueError::FailedToGetQueueArn(queue_url.to_string()))
    }

    /// set_queue_attributes - Apply attributes to an existing queue
    pub async fn set_queue_attributes(
        &self,
        queue_url: &str,
        attributes: HashMap<QueueAttributeName, String>,
    ) -> Result<(), QueueError> {
        self.client().set_queue_attributes().queue_url(queue_url).set_attributes(Some(attributes)).send().await?;
        Ok(())
    }
}

#[async_trait]
impl QueueClient for SQS {
    /// **send_message** - Send a message to the queue
    /// It returns a Result<(), QueueError> indicating whether the operation
    /// was successful or not
    async fn send_message(&self, queue: QueueType, payload: String, delay: Option<Duration>) -> Result<(), QueueError> {
        let queue_name = self.get_queue_name(&queue);
        let queue_url = self.get_queue_url_from_client(queue_name.as_str()).await?;

        let mut send_message_request = self.client().send_message().queue_url(&queue_url).message_body(&payload);

        if let Some(delay_duration) = delay {
            send_message_request = send_message_request.delay_seconds(delay_duration.as_secs() as i32);
        }

        send_message_request.send().await?;

        tracing::debug!("Sent message to queue {}", queue_name);

        Ok(())
    }

    /// consume_message_from_queue - Receive a single message from the queue
    /// and wrap it into an omniqueue delivery so the holder can ack or nack
    /// it after processing.
    async fn consume_message_from_queue(&self, queue: QueueType) -> Result<Delivery, QueueError> {
        let queue_name = self.get_queue_name(&queue);
        let queue_url = self.get_queue_url_from_client(queue_name.as_str()).await?;

        let messages = self
            .client()
            .receive_message()
            .queue_url(&queue_url)
            .max_number_of_messages(1)
            .send()
            .await?;

        let Some(messages_vec) = messages.messages else {
            return Err(omniqueue::QueueError::NoData.into());
        };

        let Some(message) = messages_vec.first() else {
            return Err(omniqueue::QueueError::NoData.into());
        };

        let consumer =
            SqsBackend::builder(SqsConfig { queue_dsn: queue_url, override_endpoint: false }).build_consumer().await?;
        let delivery = consumer.wrap_message(message);

        Ok(delivery)
    }

    async fn health_check(&self) -> Result<(), QueueError> {
        let queue_name = self.get_queue_name(&QueueType::JobProcessing);
        self.get_queue_url_from_client(queue_name.as_str()).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_name_template_substitution() {
        assert_eq!(
            SQS::get_queue_name_from_type("conveyor_{}_queue", &QueueType::JobProcessing),
            "conveyor_job_processing_queue"
        );
        assert_eq!(
            SQS::get_queue_name_from_type("conveyor_{}_queue", &QueueType::JobHandleFailure),
            "conveyor_job_handle_failure_queue"
        );
    }
}
