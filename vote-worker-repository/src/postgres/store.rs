//! PostgreSQL vote store implementation.
//!
//! This module provides the concrete implementation of `VoteStore` and
//! `StoreConnector` on top of a single `sqlx::PgConnection`.

use async_trait::async_trait;
use sqlx::{Connection, PgConnection};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::errors::VoteStoreError;
use crate::interfaces::{StoreConnector, VoteStore};
use crate::postgres::schema::ensure_schema;
use crate::types::InsertOutcome;

const INSERT_VOTE: &str = "INSERT INTO votes (id, vote) VALUES ($1, $2)";
const UPDATE_VOTE: &str = "UPDATE votes SET vote = $1 WHERE id = $2";
const KEEP_ALIVE: &str = "SELECT 1";

/// PostgreSQL-backed vote store.
///
/// Wraps one connection. It is not a pool: the poll loop owns exactly one
/// store connection and replaces it when it breaks.
///
/// # Example
///
/// ```ignore
/// use vote_worker_repository::{PostgresStoreConnector, StoreConfig, StoreConnector, VoteStore};
///
/// let connector = PostgresStoreConnector::new(StoreConfig::default());
/// let mut store = connector.open().await?;
/// store.insert_vote("123", "a").await?;
/// ```
pub struct PostgresVoteStore {
    conn: PgConnection,
}

impl PostgresVoteStore {
    /// Wrap an already established connection.
    ///
    /// The caller is responsible for the schema; `PostgresStoreConnector::open`
    /// takes care of it.
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl VoteStore for PostgresVoteStore {
    async fn is_open(&mut self) -> bool {
        match self.conn.ping().await {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "Store connection failed health check");
                false
            }
        }
    }

    async fn keep_alive(&mut self) -> Result<(), VoteStoreError> {
        sqlx::query(KEEP_ALIVE).execute(&mut self.conn).await?;
        Ok(())
    }

    async fn insert_vote(
        &mut self,
        voter_id: &str,
        vote: &str,
    ) -> Result<InsertOutcome, VoteStoreError> {
        let result = sqlx::query(INSERT_VOTE)
            .bind(voter_id)
            .bind(vote)
            .execute(&mut self.conn)
            .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Ok(InsertOutcome::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_vote(&mut self, voter_id: &str, vote: &str) -> Result<(), VoteStoreError> {
        let result = sqlx::query(UPDATE_VOTE)
            .bind(vote)
            .bind(voter_id)
            .execute(&mut self.conn)
            .await?;

        if result.rows_affected() == 0 {
            warn!(voter_id = %voter_id, "Update matched no row");
        }
        Ok(())
    }
}

/// Opens `PostgresVoteStore` connections.
#[derive(Debug, Clone)]
pub struct PostgresStoreConnector {
    config: StoreConfig,
}

impl PostgresStoreConnector {
    /// Create a new connector for the given connection parameters.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// The connection parameters used by this connector.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

#[async_trait]
impl StoreConnector for PostgresStoreConnector {
    type Store = PostgresVoteStore;

    /// Connect once and ensure the votes table exists.
    ///
    /// Socket, TLS, protocol and server-side startup errors while connecting
    /// are reported as `VoteStoreError::ConnectionError`. Errors while
    /// creating the table keep their driver classification, so a malformed
    /// statement is fatal while a dropped socket is retryable.
    async fn open(&self) -> Result<PostgresVoteStore, VoteStoreError> {
        let mut conn = PgConnection::connect_with(&self.config.connect_options())
            .await
            .map_err(|e| match e {
                sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::Protocol(_)
                | sqlx::Error::Database(_) => VoteStoreError::connection(e.to_string()),
                other => VoteStoreError::DatabaseError(other),
            })?;

        info!(store = %self.config, "Connected to store");

        ensure_schema(&mut conn).await?;

        Ok(PostgresVoteStore::new(conn))
    }
}
