//! Worker settings read from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::consumer::{DEFAULT_QUEUE_HOST, DEFAULT_QUEUE_PORT};
use crate::orchestrator::{OrchestratorConfig, DEFAULT_POLL_INTERVAL, VOTES_QUEUE_KEY};
use crate::retry::DEFAULT_RETRY_INTERVAL;
use vote_worker_repository::config::{
    DEFAULT_STORE_PASSWORD, DEFAULT_STORE_PORT, DEFAULT_STORE_SERVER, DEFAULT_STORE_USERNAME,
};
use vote_worker_repository::StoreConfig;

/// Everything the worker needs to start.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Logical queue host, resolved on every connect.
    pub queue_host: String,
    /// Queue port.
    pub queue_port: u16,
    /// Store connection parameters.
    pub store: StoreConfig,
    /// Poll loop settings.
    pub orchestrator: OrchestratorConfig,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_host: DEFAULT_QUEUE_HOST.to_string(),
            queue_port: DEFAULT_QUEUE_PORT,
            store: StoreConfig::default(),
            orchestrator: OrchestratorConfig::default(),
        }
    }
}

impl WorkerConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `QUEUE_HOST`: Logical queue host (default: redis)
    /// - `QUEUE_PORT`: Queue port (default: 6379)
    /// - `STORE_SERVER`: PostgreSQL host (default: db)
    /// - `STORE_PORT`: PostgreSQL port (default: 5432)
    /// - `STORE_USERNAME`: PostgreSQL user (default: postgres)
    /// - `STORE_PASSWORD`: PostgreSQL password (default: postgres)
    /// - `STORE_DATABASE`: Database name (default: server default)
    /// - `POLL_INTERVAL_MS`: Sleep between iterations (default: 100)
    /// - `RETRY_INTERVAL_MS`: Backoff between connection attempts (default: 1000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Unset variables take their default. Numeric variables that fail to
    /// parse also take their default, with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let mut store = StoreConfig::new(
            text("STORE_SERVER", DEFAULT_STORE_SERVER),
            text("STORE_USERNAME", DEFAULT_STORE_USERNAME),
            text("STORE_PASSWORD", DEFAULT_STORE_PASSWORD),
        )
        .with_port(parse_or(&lookup, "STORE_PORT", DEFAULT_STORE_PORT));
        if let Some(database) = lookup("STORE_DATABASE") {
            store = store.with_database(database);
        }

        let poll_interval_ms = parse_or(
            &lookup,
            "POLL_INTERVAL_MS",
            DEFAULT_POLL_INTERVAL.as_millis() as u64,
        );
        let retry_interval_ms = parse_or(
            &lookup,
            "RETRY_INTERVAL_MS",
            DEFAULT_RETRY_INTERVAL.as_millis() as u64,
        );

        Self {
            queue_host: text("QUEUE_HOST", DEFAULT_QUEUE_HOST),
            queue_port: parse_or(&lookup, "QUEUE_PORT", DEFAULT_QUEUE_PORT),
            store,
            orchestrator: OrchestratorConfig {
                queue_key: VOTES_QUEUE_KEY.to_string(),
                poll_interval: Duration::from_millis(poll_interval_ms),
                retry_interval: Duration::from_millis(retry_interval_ms),
            },
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = key, value = %raw, "Invalid value, using default");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = WorkerConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config.queue_host, "redis");
        assert_eq!(config.queue_port, 6379);
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.orchestrator.queue_key, "votes");
        assert_eq!(config.orchestrator.poll_interval, Duration::from_millis(100));
        assert_eq!(config.orchestrator.retry_interval, Duration::from_millis(1000));
    }

    #[test]
    fn test_overrides() {
        let config = WorkerConfig::from_lookup(lookup_from(&[
            ("QUEUE_HOST", "queue.internal"),
            ("QUEUE_PORT", "6380"),
            ("STORE_SERVER", "pg.internal"),
            ("STORE_PORT", "6543"),
            ("STORE_USERNAME", "worker"),
            ("STORE_PASSWORD", "s3cret"),
            ("STORE_DATABASE", "votes"),
            ("POLL_INTERVAL_MS", "250"),
            ("RETRY_INTERVAL_MS", "5000"),
        ]));

        assert_eq!(config.queue_host, "queue.internal");
        assert_eq!(config.queue_port, 6380);
        assert_eq!(
            config.store,
            StoreConfig::new("pg.internal", "worker", "s3cret")
                .with_port(6543)
                .with_database("votes")
        );
        assert_eq!(config.orchestrator.poll_interval, Duration::from_millis(250));
        assert_eq!(config.orchestrator.retry_interval, Duration::from_millis(5000));
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = WorkerConfig::from_lookup(lookup_from(&[
            ("QUEUE_PORT", "not-a-port"),
            ("STORE_PORT", "99999"),
            ("POLL_INTERVAL_MS", "-5"),
        ]));

        assert_eq!(config.queue_port, 6379);
        assert_eq!(config.store.port, 5432);
        assert_eq!(config.orchestrator.poll_interval, Duration::from_millis(100));
    }
}
