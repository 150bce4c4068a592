//! Consumer module for the vote worker.
//!
//! Provides the queue abstraction and its Redis implementation.

mod queue;
mod redis_queue;
mod resolver;

pub use queue::{QueueConnector, VoteQueue};
pub use redis_queue::{RedisQueue, RedisQueueConnector, DEFAULT_QUEUE_HOST, DEFAULT_QUEUE_PORT};
pub use resolver::resolve_host;
