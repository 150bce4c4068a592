//! Dependency initialization and wiring for the vote worker.

use tracing::info;

use crate::config::WorkerConfig;
use crate::consumer::RedisQueueConnector;
use crate::errors::WorkerError;
use crate::orchestrator::Orchestrator;
use vote_worker_repository::PostgresStoreConnector;

/// The production orchestrator: Redis queue, PostgreSQL store.
pub type VoteOrchestrator = Orchestrator<RedisQueueConnector, PostgresStoreConnector>;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The connected orchestrator ready to run.
    pub orchestrator: VoteOrchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// See [`WorkerConfig::from_env`] for the recognized variables.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Once both the store and the queue are reachable
    /// * `Err(WorkerError)` - If a dependency fails with a non-retryable error
    pub async fn new() -> Result<Self, WorkerError> {
        Self::from_config(WorkerConfig::from_env()).await
    }

    /// Initialize all dependencies from an explicit configuration.
    pub async fn from_config(config: WorkerConfig) -> Result<Self, WorkerError> {
        info!(
            queue_host = %config.queue_host,
            queue_port = config.queue_port,
            store = %config.store,
            poll_interval_ms = config.orchestrator.poll_interval.as_millis() as u64,
            retry_interval_ms = config.orchestrator.retry_interval.as_millis() as u64,
            "Initializing dependencies"
        );

        let queue_connector = RedisQueueConnector::new(config.queue_host, config.queue_port);
        let store_connector = PostgresStoreConnector::new(config.store);

        let orchestrator =
            Orchestrator::connect(queue_connector, store_connector, config.orchestrator).await?;

        info!("Store and queue connections established");

        Ok(Self { orchestrator })
    }
}
