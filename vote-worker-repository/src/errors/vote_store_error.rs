//! Vote store error types.
//!
//! This module defines the unified error type for all vote store operations and
//! the classification the worker uses to decide whether a failure is retryable.

use thiserror::Error;

/// Unified errors from vote store operations.
///
/// Used by the `VoteStore` and `StoreConnector` traits. A unique-constraint
/// violation on insert is never reported through this type; it is an
/// `InsertOutcome::AlreadyExists` instead.
#[derive(Debug, Error)]
pub enum VoteStoreError {
    /// Failed to reach the store (socket, TLS, handshake or startup failure).
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error reported by the database driver while running a statement.
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// A statement was rejected for a reason other than connectivity.
    #[error("Query error: {0}")]
    QueryError(String),
}

impl VoteStoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Whether the error means the store is unreachable rather than that the
    /// request itself was wrong.
    ///
    /// Connectivity errors are retried by the connector and trigger a
    /// reconnect in the poll loop; everything else is fatal.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::ConnectionError(_) => true,
            Self::DatabaseError(e) => is_connectivity_error(e),
            Self::QueryError(_) => false,
        }
    }
}

/// Classify a driver error as a connectivity failure.
///
/// Besides transport failures this covers the FATAL notices a server sends
/// before closing the socket, such as a terminated backend or a restart.
fn is_connectivity_error(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => true,
        sqlx::Error::Database(e) => e.code().is_some_and(|code| is_connectivity_sqlstate(&code)),
        _ => false,
    }
}

/// SQLSTATE codes meaning the server dropped or refused the session.
///
/// Class 08 is connection exceptions. 57P01, 57P02 and 57P03 are
/// admin_shutdown, crash_shutdown and cannot_connect_now.
fn is_connectivity_sqlstate(code: &str) -> bool {
    code.starts_with("08") || matches!(code, "57P01" | "57P02" | "57P03")
}
