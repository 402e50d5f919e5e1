use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::types::queue::QueueType;

#[derive(Clone)]
pub struct DlqConfig {
    /// Receives after which the broker moves the message to the dead-letter
    /// queue. Kept above the default application retry budget so the budget,
    /// not the broker, decides terminal failure.
    pub max_receive_count: u32,
    pub dlq_name: QueueType,
}

#[derive(Clone)]
pub struct QueueConfig {
    /// Seconds a delivery stays invisible before the broker treats the
    /// holder as failed and redelivers. The pipeline's only processing
    /// timeout.
    pub visibility_timeout: u32,
    pub dlq_config: Option<DlqConfig>,
}

lazy_static! {
    pub static ref QUEUES: HashMap<QueueType, QueueConfig> = {
        let mut map = HashMap::new();
        map.insert(
            QueueType::JobProcessing,
            QueueConfig {
                visibility_timeout: 300,
                dlq_config: Some(DlqConfig { max_receive_count: 5, dlq_name: QueueType::JobHandleFailure }),
            },
        );
        map.insert(QueueType::JobHandleFailure, QueueConfig { visibility_timeout: 300, dlq_config: None });
        map
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_queue_dead_letters_into_failure_queue() {
        let config = QUEUES.get(&QueueType::JobProcessing).unwrap();
        let dlq = config.dlq_config.as_ref().unwrap();
        assert_eq!(dlq.dlq_name, QueueType::JobHandleFailure);
        assert!(dlq.max_receive_count >= 3, "broker redelivery must outlast the application retry budget");
        assert!(QUEUES.get(&QueueType::JobHandleFailure).unwrap().dlq_config.is_none());
    }
}
