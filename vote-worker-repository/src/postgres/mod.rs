//! PostgreSQL implementation of the vote store.
//!
//! This module provides a concrete implementation of `VoteStore` and
//! `StoreConnector` using PostgreSQL as the backend.

mod schema;
mod store;

pub use schema::{ensure_schema, CREATE_VOTES_TABLE};
pub use store::{PostgresStoreConnector, PostgresVoteStore};
