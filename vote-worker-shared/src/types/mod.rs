//! This module defines the core data structures and types used across the vote worker.
//! It re-exports specific types like `VoteMessage`.

pub mod vote_message;

pub use vote_message::VoteMessage;
