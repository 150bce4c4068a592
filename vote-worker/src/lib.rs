//! # Vote Worker
//!
//! Drains vote events from a Redis list and stores them in PostgreSQL as
//! one row per voter.
//!
//! ## Architecture
//!
//! The worker follows the Consumer-Loader pattern with a single sequential
//! poll loop:
//!
//! 1. **Consumer**: Pops one JSON vote at a time from the `votes` list
//! 2. **Loader**: Inserts the vote, or overwrites the voter's previous vote
//! 3. **Orchestrator**: Throttles, health-checks and reconnects both
//!    dependencies, and keeps the store connection warm while idle
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`consumer`]: Queue abstraction and its Redis implementation
//! - [`loader`]: Insert-or-update of a single vote
//! - [`orchestrator`]: The poll loop
//! - [`retry`]: Connect-with-retry for both dependencies
//! - [`errors`]: Error types for the worker

pub mod config;
pub mod consumer;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod retry;

pub use config::{Dependencies, WorkerConfig};
pub use errors::{QueueError, WorkerError};
