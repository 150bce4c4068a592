//! Blocking connect-with-retry shared by the queue and store connectors.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

/// Default backoff between connection attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(1000);

/// Run `attempt` until it succeeds or fails with a non-retryable error.
///
/// Retries are unbounded and spaced by a fixed `retry_interval`. Each failed
/// retryable attempt is logged as a warning before sleeping.
///
/// # Arguments
///
/// * `dependency` - Name of the dependency, used in log records
/// * `retry_interval` - Fixed delay between attempts
/// * `attempt` - Produces one connection attempt
/// * `is_retryable` - Classifies an error as transient
///
/// # Returns
///
/// * `Ok(T)` - The first successful result
/// * `Err(E)` - The first non-retryable error
pub async fn connect_with_retry<T, E, F, Fut, R>(
    dependency: &str,
    retry_interval: Duration,
    mut attempt: F,
    is_retryable: R,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: Fn(&E) -> bool,
    E: Display,
{
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;

        match attempt().await {
            Ok(value) => {
                if attempts > 1 {
                    info!(dependency = %dependency, attempts, "Dependency became available");
                }
                return Ok(value);
            }
            Err(e) if is_retryable(&e) => {
                warn!(
                    dependency = %dependency,
                    error = %e,
                    attempt = attempts,
                    retry_interval_ms = retry_interval.as_millis() as u64,
                    "Waiting for dependency to become available"
                );
                sleep(retry_interval).await;
            }
            Err(e) => return Err(e),
        }
    }
}
