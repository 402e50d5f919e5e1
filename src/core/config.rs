use crate::cli::RunCmd;
use crate::core::client::database::postgres::PostgresClient;
use crate::core::client::database::DatabaseClient;
use crate::core::client::executor::http::HttpJobExecutor;
use crate::core::client::executor::JobExecutor;
use crate::core::client::queue::sqs::{load_sdk_config, SQS};
use crate::core::client::queue::QueueClient;
use crate::error::{ConveyorError, ConveyorResult};
use crate::types::params::{DatabaseArgs, QueueArgs, ServerParams, ServiceParams};
use crate::utils::retry::retry_with_backoff;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Attempts made against the store and the broker before startup is
/// declared failed.
const STARTUP_HEALTH_CHECK_ATTEMPTS: u32 = 5;
const STARTUP_HEALTH_CHECK_BASE_DELAY: Duration = Duration::from_secs(1);

/// Shared application configuration: runtime parameters plus handles to the
/// store, the broker and the job-body executor. Cheap to share behind an
/// `Arc`; the gateway and every worker slot hold the same instance.
pub struct Config {
    server_params: ServerParams,
    service_params: ServiceParams,
    database: Arc<dyn DatabaseClient>,
    queue: Arc<dyn QueueClient>,
    executor: Arc<dyn JobExecutor>,
    notification_client: reqwest::Client,
}

impl Config {
    pub fn new(
        server_params: ServerParams,
        service_params: ServiceParams,
        database: Arc<dyn DatabaseClient>,
        queue: Arc<dyn QueueClient>,
        executor: Arc<dyn JobExecutor>,
        notification_client: reqwest::Client,
    ) -> Self {
        Self { server_params, service_params, database, queue, executor, notification_client }
    }

    /// Build the full configuration from the run command. Verifies the
    /// store and the broker are reachable (and the schema initialized)
    /// before returning; dependents must not start ahead of them.
    pub async fn from_run_cmd(run_cmd: &RunCmd) -> ConveyorResult<Self> {
        let database_args = DatabaseArgs::from(run_cmd.database_args.clone());
        let queue_args = QueueArgs::from(run_cmd.queue_args.clone());
        let server_params = ServerParams::from(run_cmd.server_args.clone());
        let service_params = ServiceParams::from(run_cmd.service_args.clone());

        let database = PostgresClient::new(&database_args).await?;
        let sdk_config = load_sdk_config(&queue_args).await;
        let queue = SQS::new(&sdk_config, &queue_args);
        let executor = HttpJobExecutor::new(service_params.executor_url.clone(), service_params.executor_timeout)?;

        retry_with_backoff(
            || database.health_check(),
            STARTUP_HEALTH_CHECK_ATTEMPTS,
            STARTUP_HEALTH_CHECK_BASE_DELAY,
            "store health check",
        )
        .await?;
        info!("Store reachable and schema initialized");

        retry_with_backoff(
            || queue.health_check(),
            STARTUP_HEALTH_CHECK_ATTEMPTS,
            STARTUP_HEALTH_CHECK_BASE_DELAY,
            "broker health check",
        )
        .await?;
        info!("Broker reachable");

        let notification_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ConveyorError::ConfigError(format!("Failed to build notification client: {e}")))?;

        Ok(Self::new(
            server_params,
            service_params,
            Arc::new(database),
            Arc::new(queue),
            Arc::new(executor),
            notification_client,
        ))
    }

    pub fn database(&self) -> &dyn DatabaseClient {
        self.database.as_ref()
    }

    pub fn queue(&self) -> &dyn QueueClient {
        self.queue.as_ref()
    }

    pub fn executor(&self) -> &dyn JobExecutor {
        self.executor.as_ref()
    }

    pub fn server_params(&self) -> &ServerParams {
        &self.server_params
    }

    pub fn service_params(&self) -> &ServiceParams {
        &self.service_params
    }

    /// Client used for best-effort webhook notifications.
    pub fn notification_client(&self) -> &reqwest::Client {
        &self.notification_client
    }
}
