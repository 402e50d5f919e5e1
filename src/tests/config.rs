use crate::core::client::database::{DatabaseClient, MockDatabaseClient};
use crate::core::client::executor::{JobExecutor, MockJobExecutor};
use crate::core::client::queue::{MockQueueClient, QueueClient};
use crate::core::config::Config;
use crate::types::params::{ServerParams, ServiceParams};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builds a [`Config`] wired with mock clients. Clients left unset default
/// to strict mocks, so any unexpected store/broker/executor call fails the
/// test.
pub struct TestConfigBuilder {
    database: Option<Arc<dyn DatabaseClient>>,
    queue: Option<Arc<dyn QueueClient>>,
    executor: Option<Arc<dyn JobExecutor>>,
    service_params: ServiceParams,
    server_params: ServerParams,
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            database: None,
            queue: None,
            executor: None,
            service_params: ServiceParams {
                worker_slots: 1,
                retry_budget: 3,
                executor_url: Url::parse("http://localhost:8000/execute").expect("static url"),
                executor_timeout: Duration::from_secs(5),
                stale_job_threshold: Duration::from_secs(900),
                reconciliation_interval: Duration::from_secs(300),
            },
            server_params: ServerParams { host: "127.0.0.1".to_string(), port: 0 },
        }
    }

    pub fn with_database(mut self, database: impl DatabaseClient + 'static) -> Self {
        self.database = Some(Arc::new(database));
        self
    }

    pub fn with_queue(mut self, queue: impl QueueClient + 'static) -> Self {
        self.queue = Some(Arc::new(queue));
        self
    }

    pub fn with_executor(mut self, executor: impl JobExecutor + 'static) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    pub fn with_retry_budget(mut self, retry_budget: i32) -> Self {
        self.service_params.retry_budget = retry_budget;
        self
    }

    pub fn build(self) -> Arc<Config> {
        Arc::new(Config::new(
            self.server_params,
            self.service_params,
            self.database.unwrap_or_else(|| Arc::new(MockDatabaseClient::new())),
            self.queue.unwrap_or_else(|| Arc::new(MockQueueClient::new())),
            self.executor.unwrap_or_else(|| Arc::new(MockJobExecutor::new())),
            reqwest::Client::new(),
        ))
    }
}
