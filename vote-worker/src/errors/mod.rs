//! Error types for the vote worker.

use thiserror::Error;
use vote_worker_repository::VoteStoreError;

/// Errors that can occur while talking to the vote queue.
#[derive(Error, Debug)]
pub enum QueueError {
    /// The queue could not be reached.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error reported by the Redis client.
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    /// The queue host name did not resolve to a usable IPv4 address.
    #[error("Host resolution error: {0}")]
    ResolveError(String),
}

impl QueueError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a host resolution error.
    pub fn resolve(msg: impl Into<String>) -> Self {
        Self::ResolveError(msg.into())
    }

    /// Whether the error means the queue is unreachable.
    ///
    /// Connectivity errors are retried while connecting and make the poll loop
    /// reconnect; resolution and protocol errors are fatal.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::ConnectionError(_) => true,
            Self::RedisError(e) => {
                e.is_connection_refusal()
                    || e.is_io_error()
                    || e.is_timeout()
                    || e.is_connection_dropped()
            }
            Self::ResolveError(_) => false,
        }
    }
}

/// Fatal errors of the vote worker.
///
/// Anything that reaches this type stops the poll loop and terminates the
/// process with a non-zero status.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Configuration or startup error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Unrecoverable queue error.
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// Unrecoverable store error.
    #[error("Store error: {0}")]
    Store(#[from] VoteStoreError),

    /// A queued payload was not a valid vote message.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WorkerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_refused_connection_is_connectivity() {
        let error = QueueError::from(redis::RedisError::from(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "connection refused",
        )));
        assert!(error.is_connectivity());
    }

    #[test]
    fn test_connection_error_is_connectivity() {
        assert!(QueueError::connection("gone").is_connectivity());
    }

    #[test]
    fn test_resolve_error_is_fatal() {
        assert!(!QueueError::resolve("no IPv4 address for redis").is_connectivity());
    }

    #[test]
    fn test_worker_error_wraps_sources() {
        let error = WorkerError::from(QueueError::resolve("no IPv4 address for redis"));
        assert_eq!(
            error.to_string(),
            "Queue error: Host resolution error: no IPv4 address for redis"
        );

        let error = WorkerError::from(VoteStoreError::query("syntax error"));
        assert_eq!(error.to_string(), "Store error: Query error: syntax error");
    }
}
