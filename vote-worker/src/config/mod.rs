//! Configuration and dependency initialization.

mod dependencies;
mod settings;

pub use dependencies::{Dependencies, VoteOrchestrator};
pub use settings::WorkerConfig;
