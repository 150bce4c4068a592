//! Queue trait definitions.
//!
//! The poll loop only ever talks to the queue through these traits, so it can
//! be driven by Redis in production and by in-memory mocks in tests.

use async_trait::async_trait;

use crate::errors::QueueError;

/// A single, exclusively owned connection to the vote queue.
#[async_trait]
pub trait VoteQueue: Send {
    /// Check whether the connection is still usable.
    async fn is_alive(&mut self) -> bool;

    /// Pop one raw payload from the head of the list stored at `key`.
    ///
    /// Never blocks waiting for data.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(payload))` - If the list had an element
    /// * `Ok(None)` - If the list is empty or missing
    /// * `Err(QueueError)` - If the queue could not be read
    async fn pop(&mut self, key: &str) -> Result<Option<String>, QueueError>;
}

/// Opens connections to the vote queue.
///
/// `open` performs a single attempt, including host resolution; retrying is
/// the caller's job.
#[async_trait]
pub trait QueueConnector: Send + Sync {
    /// The connection type produced by this connector.
    type Queue: VoteQueue;

    /// Resolve the queue host and open a new connection.
    ///
    /// # Returns
    ///
    /// * `Ok(Self::Queue)` - A ready-to-use connection
    /// * `Err(QueueError)` - Connectivity errors are retryable, all others are fatal
    async fn open(&self) -> Result<Self::Queue, QueueError>;
}
