//! Interface definitions for the vote store.
//!
//! This module defines the abstract `VoteStore` and `StoreConnector` traits that
//! allow for dependency injection and swappable store implementations.

mod vote_store;

pub use vote_store::{StoreConnector, VoteStore};
