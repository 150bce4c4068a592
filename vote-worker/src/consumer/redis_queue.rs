//! Redis-backed vote queue.
//!
//! Votes are JSON strings pushed onto a Redis list by the front end. The
//! worker pops them one at a time with `LPOP`, so every element is delivered
//! to at most one worker even when several run against the same list.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::Client;
use tracing::{debug, info};

use crate::consumer::queue::{QueueConnector, VoteQueue};
use crate::consumer::resolver::resolve_host;
use crate::errors::QueueError;

/// Default logical queue host.
pub const DEFAULT_QUEUE_HOST: &str = "redis";

/// Default Redis port.
pub const DEFAULT_QUEUE_PORT: u16 = 6379;

/// A single Redis connection.
pub struct RedisQueue {
    conn: MultiplexedConnection,
}

impl RedisQueue {
    /// Wrap an established connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl VoteQueue for RedisQueue {
    async fn is_alive(&mut self) -> bool {
        match redis::cmd("PING").query_async::<String>(&mut self.conn).await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Queue connection failed health check");
                false
            }
        }
    }

    async fn pop(&mut self, key: &str) -> Result<Option<String>, QueueError> {
        let payload = redis::cmd("LPOP")
            .arg(key)
            .query_async::<Option<String>>(&mut self.conn)
            .await?;
        Ok(payload)
    }
}

/// Opens `RedisQueue` connections to a logical host.
///
/// The host is resolved again on every `open`, so a restarted queue container
/// with a new address is picked up on reconnect.
#[derive(Debug, Clone)]
pub struct RedisQueueConnector {
    host: String,
    port: u16,
}

impl RedisQueueConnector {
    /// Create a connector for `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The logical host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The Redis port.
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for RedisQueueConnector {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_HOST, DEFAULT_QUEUE_PORT)
    }
}

#[async_trait]
impl QueueConnector for RedisQueueConnector {
    type Queue = RedisQueue;

    async fn open(&self) -> Result<RedisQueue, QueueError> {
        let ip = resolve_host(&self.host).await?;
        info!(host = %self.host, ip = %ip, "Found queue");

        let client = Client::open(format!("redis://{}:{}/", ip, self.port))?;
        let conn = client.get_multiplexed_async_connection().await?;

        info!(ip = %ip, port = self.port, "Connected to queue");
        Ok(RedisQueue::new(conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_connector() {
        let connector = RedisQueueConnector::default();
        assert_eq!(connector.host(), "redis");
        assert_eq!(connector.port(), 6379);
    }

    #[tokio::test]
    async fn test_open_against_refused_port_is_connectivity() {
        let connector = RedisQueueConnector::new("127.0.0.1", 1);
        let error = connector.open().await.err().unwrap();
        assert!(matches!(error, QueueError::RedisError(_)));
        assert!(error.is_connectivity());
    }

    #[tokio::test]
    async fn test_open_with_unresolvable_host_is_fatal() {
        let connector = RedisQueueConnector::new("::1", DEFAULT_QUEUE_PORT);
        let error = connector.open().await.err().unwrap();
        assert!(matches!(error, QueueError::ResolveError(_)));
    }
}
