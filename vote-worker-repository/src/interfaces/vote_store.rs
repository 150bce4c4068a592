//! Vote store trait definitions.
//!
//! This module defines the abstract interface for the durable vote store and
//! for opening connections to it, allowing the poll loop to be driven by
//! different backend implementations (PostgreSQL, in-memory mocks, etc.).

use async_trait::async_trait;

use crate::errors::VoteStoreError;
use crate::types::InsertOutcome;

/// A single, exclusively owned connection to the vote store.
///
/// Methods take `&mut self`: a connection is never shared, and replacing it on
/// reconnect means dropping the old value.
///
/// # Schema
///
/// Implementations store one row per voter, keyed by `id` (the voter id,
/// unique and not null) with a not-null `vote` column.
#[async_trait]
pub trait VoteStore: Send {
    /// Check whether the connection is still usable.
    ///
    /// # Returns
    ///
    /// * `true` - If the connection answered a health check
    /// * `false` - If the connection is closed or broken
    async fn is_open(&mut self) -> bool;

    /// Issue a trivial query to keep the connection warm and detect half-open
    /// links early.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the query succeeded
    /// * `Err(VoteStoreError)` - If the query failed
    async fn keep_alive(&mut self) -> Result<(), VoteStoreError>;

    /// Insert a new vote row.
    ///
    /// # Arguments
    ///
    /// * `voter_id` - The voter id, used as the row key
    /// * `vote` - The selected option
    ///
    /// # Returns
    ///
    /// * `Ok(InsertOutcome::Inserted)` - If a new row was created
    /// * `Ok(InsertOutcome::AlreadyExists)` - If a row for `voter_id` already exists
    /// * `Err(VoteStoreError)` - For any other failure
    async fn insert_vote(
        &mut self,
        voter_id: &str,
        vote: &str,
    ) -> Result<InsertOutcome, VoteStoreError>;

    /// Overwrite the vote of an existing row.
    ///
    /// # Arguments
    ///
    /// * `voter_id` - The voter id of the row to update
    /// * `vote` - The new selected option
    async fn update_vote(&mut self, voter_id: &str, vote: &str) -> Result<(), VoteStoreError>;
}

/// Opens connections to the vote store.
///
/// `open` performs a single attempt; retrying is the caller's job. A
/// successful `open` also guarantees the votes table exists.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// The connection type produced by this connector.
    type Store: VoteStore;

    /// Open a new connection and ensure the schema exists.
    ///
    /// # Returns
    ///
    /// * `Ok(Self::Store)` - A ready-to-use connection
    /// * `Err(VoteStoreError)` - Connectivity errors are retryable, all others are fatal
    async fn open(&self) -> Result<Self::Store, VoteStoreError>;
}
