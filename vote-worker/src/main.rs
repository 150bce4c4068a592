//! Vote Worker Main Entry Point
//!
//! Moves votes from the Redis `votes` list into the PostgreSQL `votes` table
//! until a fatal error occurs.

use dotenv::dotenv;
use std::env;
use tracing::{error, info, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vote_worker::{Dependencies, WorkerError};

/// Initialize tracing/logging.
///
/// Warnings and errors go to stderr, everything else to stdout.
fn init_tracing() -> Result<(), WorkerError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vote_worker=info,vote_worker_repository=info"));

    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(writer),
            )
            .try_init()
            .map_err(|e| WorkerError::config(format!("Failed to initialize tracing: {}", e)))?;

        info!(
            service_name = "vote-worker",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(writer),
            )
            .try_init()
            .map_err(|e| WorkerError::config(format!("Failed to initialize tracing: {}", e)))?;

        info!(
            service_name = "vote-worker",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), WorkerError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing()?;

    info!("Starting vote worker");

    let mut deps = match Dependencies::new().await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match deps.orchestrator.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(
                error = %e,
                stats = ?deps.orchestrator.stats(),
                "Vote worker failed"
            );
            Err(e)
        }
    }
}
