//! # Vote Worker Repository
//!
//! This crate provides traits and implementations for interacting with the
//! vote store. It includes definitions for errors, interfaces, connection
//! parameters, and a concrete implementation for PostgreSQL.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod postgres;
pub mod types;

pub use config::StoreConfig;
pub use errors::VoteStoreError;
pub use interfaces::{StoreConnector, VoteStore};
pub use postgres::{PostgresStoreConnector, PostgresVoteStore};
pub use types::InsertOutcome;
