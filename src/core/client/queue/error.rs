use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::operation::create_queue::CreateQueueError;
use aws_sdk_sqs::operation::get_queue_attributes::GetQueueAttributesError;
use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlError;
use aws_sdk_sqs::operation::receive_message::ReceiveMessageError;
use aws_sdk_sqs::operation::send_message::SendMessageError;
use aws_sdk_sqs::operation::set_queue_attributes::SetQueueAttributesError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Failed to get queue url for queue {0}")]
    FailedToGetQueueUrl(String),

    #[error("Failed to get queue arn for queue {0}")]
    FailedToGetQueueArn(String),

    #[error("Error from queue: {0}")]
    ErrorFromQueueError(#[from] omniqueue::QueueError),

    #[error("Failed to send message: {0}")]
    SendMessageError(#[from] SdkError<SendMessageError>),

    #[error("Failed to receive message: {0}")]
    ReceiveMessageError(#[from] SdkError<ReceiveMessageError>),

    #[error("Failed to resolve queue url: {0}")]
    GetQueueUrlError(#[from] SdkError<GetQueueUrlError>),

    #[error("Failed to get queue attributes: {0}")]
    GetQueueAttributesError(#[from] SdkError<GetQueueAttributesError>),

    #[error("Failed to create queue: {0}")]
    CreateQueueError(#[from] SdkError<CreateQueueError>),

    #[error("Failed to set queue attributes: {0}")]
    SetQueueAttributesError(#[from] SdkError<SetQueueAttributesError>),
}

impl QueueError {
    /// An empty receive is the broker's way of saying "nothing to do";
    /// callers poll again instead of treating it as a failure.
    pub fn is_no_data(&self) -> bool {
        matches!(self, QueueError::ErrorFromQueueError(omniqueue::QueueError::NoData))
    }
}
