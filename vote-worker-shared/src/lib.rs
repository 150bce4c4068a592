//! # Vote Worker Shared
//!
//! This crate defines shared data structures and types used across the vote worker.
//! It includes the vote message exchanged between producers and the worker.

pub mod types;

pub use types::vote_message::VoteMessage;
