//! Orchestrator module for the vote worker.
//!
//! Owns the queue and store connections and drives the poll loop: throttle,
//! check the queue, pop one vote, then either upsert it or keep the store
//! connection warm.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::consumer::{QueueConnector, VoteQueue};
use crate::errors::{QueueError, WorkerError};
use crate::loader::{upsert_vote, UpsertOutcome};
use crate::retry::{connect_with_retry, DEFAULT_RETRY_INTERVAL};
use vote_worker_repository::{StoreConnector, VoteStore, VoteStoreError};
use vote_worker_shared::VoteMessage;

/// Name of the Redis list votes are popped from.
pub const VOTES_QUEUE_KEY: &str = "votes";

/// Default throttle between two iterations.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Queue list key.
    pub queue_key: String,
    /// Sleep at the start of every iteration.
    pub poll_interval: Duration,
    /// Backoff between connection attempts.
    pub retry_interval: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            queue_key: VOTES_QUEUE_KEY.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

/// Counters since startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrchestratorStats {
    /// Completed iterations.
    pub iterations: u64,
    /// Votes written to the store.
    pub votes_processed: u64,
    /// Votes that created a row.
    pub votes_inserted: u64,
    /// Votes that overwrote a row.
    pub votes_updated: u64,
    /// Votes popped while the store was closed.
    pub votes_dropped: u64,
    /// Keep-alive queries issued on an empty queue.
    pub keep_alives: u64,
    /// Queue connections replaced by the loop.
    pub queue_reconnects: u64,
    /// Store connections replaced by the loop.
    pub store_reconnects: u64,
}

/// What a single iteration of the poll loop did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Iteration {
    /// A vote was popped and stored.
    Processed {
        vote: VoteMessage,
        outcome: UpsertOutcome,
    },
    /// A vote was popped while the store was closed. The store was reopened
    /// and the vote is lost.
    Dropped(VoteMessage),
    /// The queue was empty; the store connection was exercised instead.
    KeepAlive,
    /// The pop failed on a broken queue connection, which was discarded.
    QueueLost,
}

/// Orchestrator that runs the poll loop.
///
/// Both connections are owned exclusively by the orchestrator. A broken
/// connection is replaced by a freshly opened one, never repaired in place.
pub struct Orchestrator<Q: QueueConnector, S: StoreConnector> {
    queue_connector: Q,
    store_connector: S,
    queue: Option<Q::Queue>,
    store: S::Store,
    config: OrchestratorConfig,
    stats: OrchestratorStats,
}

impl<Q: QueueConnector, S: StoreConnector> Orchestrator<Q, S> {
    /// Open the store, then the queue, retrying connectivity errors on both.
    ///
    /// Blocks until both dependencies are reachable. Fatal connector errors
    /// (host resolution, schema creation) are returned.
    pub async fn connect(
        queue_connector: Q,
        store_connector: S,
        config: OrchestratorConfig,
    ) -> Result<Self, WorkerError> {
        let store = open_store(&store_connector, config.retry_interval).await?;
        let queue = open_queue(&queue_connector, config.retry_interval).await?;

        Ok(Self {
            queue_connector,
            store_connector,
            queue: Some(queue),
            store,
            config,
            stats: OrchestratorStats::default(),
        })
    }

    /// Get the counters accumulated since startup.
    pub fn stats(&self) -> OrchestratorStats {
        self.stats
    }

    /// Run the poll loop.
    ///
    /// Never returns under normal operation. The only way out is a fatal
    /// error, which is handed back to the caller.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<(), WorkerError> {
        info!(
            queue_key = %self.config.queue_key,
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            "Starting vote poll loop"
        );

        loop {
            self.poll_once().await?;
            debug!(stats = ?self.stats, "Iteration complete");
        }
    }

    /// Run a single iteration of the poll loop.
    pub async fn poll_once(&mut self) -> Result<Iteration, WorkerError> {
        sleep(self.config.poll_interval).await;

        let iteration = self.step().await?;
        self.stats.iterations += 1;
        Ok(iteration)
    }

    async fn step(&mut self) -> Result<Iteration, WorkerError> {
        let mut current = self.queue.take();
        let alive = match current.as_mut() {
            Some(queue) => queue.is_alive().await,
            None => false,
        };
        let queue = match current {
            Some(queue) if alive => queue,
            _ => {
                warn!("Queue connection is not alive, reconnecting");
                let queue = open_queue(&self.queue_connector, self.config.retry_interval).await?;
                self.stats.queue_reconnects += 1;
                queue
            }
        };

        let queue = self.queue.insert(queue);
        let payload = match queue.pop(&self.config.queue_key).await {
            Ok(payload) => payload,
            Err(e) if e.is_connectivity() => {
                warn!(error = %e, "Lost queue connection while popping");
                self.queue = None;
                return Ok(Iteration::QueueLost);
            }
            Err(e) => return Err(e.into()),
        };

        match payload {
            Some(payload) => self.process(&payload).await,
            None => self.keep_alive().await,
        }
    }

    async fn process(&mut self, payload: &str) -> Result<Iteration, WorkerError> {
        let vote = VoteMessage::from_json(payload)?;

        if !self.store.is_open().await {
            warn!(
                voter_id = %vote.voter_id,
                vote = %vote.vote,
                "Store connection is closed, dropping vote and reconnecting"
            );
            self.reopen_store().await?;
            self.stats.votes_dropped += 1;
            return Ok(Iteration::Dropped(vote));
        }

        info!(voter_id = %vote.voter_id, vote = %vote.vote, "Processing vote");
        let outcome = upsert_vote(&mut self.store, &vote).await?;

        self.stats.votes_processed += 1;
        match outcome {
            UpsertOutcome::Inserted => self.stats.votes_inserted += 1,
            UpsertOutcome::Updated => self.stats.votes_updated += 1,
        }

        Ok(Iteration::Processed { vote, outcome })
    }

    async fn keep_alive(&mut self) -> Result<Iteration, WorkerError> {
        if let Err(e) = self.store.keep_alive().await {
            if e.is_connectivity() {
                warn!(error = %e, "Keep-alive failed, reconnecting to store");
            } else if !self.store.is_open().await {
                // An unclassified error on a dead link is still a lost connection
                warn!(error = %e, "Keep-alive failed on a closed connection, reconnecting to store");
            } else {
                return Err(e.into());
            }
            self.reopen_store().await?;
        }

        self.stats.keep_alives += 1;
        Ok(Iteration::KeepAlive)
    }

    async fn reopen_store(&mut self) -> Result<(), WorkerError> {
        self.store = open_store(&self.store_connector, self.config.retry_interval).await?;
        self.stats.store_reconnects += 1;
        Ok(())
    }
}

async fn open_store<S: StoreConnector>(
    connector: &S,
    retry_interval: Duration,
) -> Result<S::Store, VoteStoreError> {
    connect_with_retry(
        "store",
        retry_interval,
        move || connector.open(),
        VoteStoreError::is_connectivity,
    )
    .await
}

async fn open_queue<Q: QueueConnector>(
    connector: &Q,
    retry_interval: Duration,
) -> Result<Q::Queue, QueueError> {
    connect_with_retry(
        "queue",
        retry_interval,
        move || connector.open(),
        QueueError::is_connectivity,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.queue_key, "votes");
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert_eq!(config.retry_interval, Duration::from_millis(1000));
    }

    #[test]
    fn test_stats_start_at_zero() {
        let stats = OrchestratorStats::default();
        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.votes_processed, 0);
        assert_eq!(stats.store_reconnects, 0);
    }
}
