//! Error classification of the PostgreSQL connector against real sockets.
//!
//! These tests need no database: they connect to a local port nothing listens on.

use vote_worker_repository::{PostgresStoreConnector, StoreConfig, StoreConnector, VoteStoreError};

#[tokio::test]
async fn test_open_against_refused_port_is_connectivity() {
    let config = StoreConfig::new("127.0.0.1", "postgres", "postgres").with_port(1);
    let connector = PostgresStoreConnector::new(config);

    let error = connector.open().await.err().unwrap();

    assert!(matches!(error, VoteStoreError::ConnectionError(_)));
    assert!(error.is_connectivity());
}
