//! Logical host name resolution for the queue.

use std::net::{IpAddr, Ipv4Addr};

use tokio::net::lookup_host;

use crate::errors::QueueError;

/// Resolve `name` and return its first IPv4 address.
///
/// Literal IPv4 addresses resolve to themselves. A lookup failure or an answer
/// without any IPv4 address is a `QueueError::ResolveError`, which the caller
/// treats as fatal.
pub async fn resolve_host(name: &str) -> Result<Ipv4Addr, QueueError> {
    let addrs = lookup_host((name, 0))
        .await
        .map_err(|e| QueueError::resolve(format!("failed to resolve {}: {}", name, e)))?;

    addrs
        .map(|addr| addr.ip())
        .find_map(|ip| match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| QueueError::resolve(format!("no IPv4 address for {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_ipv4_literal() {
        let ip = resolve_host("127.0.0.1").await.unwrap();
        assert_eq!(ip, Ipv4Addr::LOCALHOST);
    }

    #[tokio::test]
    async fn test_ipv6_only_answer_is_resolve_error() {
        let error = resolve_host("::1").await.unwrap_err();
        assert!(matches!(error, QueueError::ResolveError(_)));
        assert!(!error.is_connectivity());
    }
}
