//! Error types for the vote worker repository.
//!
//! This module provides a unified error type for all vote store operations.

mod vote_store_error;

pub use vote_store_error::VoteStoreError;
