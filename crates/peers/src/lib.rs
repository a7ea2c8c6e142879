//! Lazy, reusable outbound RPC channels keyed by peer address.
//!
//! Opens a channel to a peer on first use and memoizes it; channel
//! lifetime equals process lifetime (the core never closes a stub). The
//! pool is single-process and shared-mutable: compute-if-absent must
//! ensure at most one channel is opened per address even under
//! concurrent first contact (extra channels would be a leak, not a
//! correctness bug, but we avoid them anyway).

use std::sync::Arc;

use dashmap::DashMap;
use proto::cache_service_client::CacheServiceClient;
use thiserror::Error;
use tokio::sync::OnceCell;
use tonic::transport::Channel;

#[derive(Debug, Error)]
pub enum PeerError {
    #[error("invalid peer address {address}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },
    #[error("failed to connect to peer {address}: {source}")]
    ConnectFailed {
        address: String,
        #[source]
        source: tonic::transport::Error,
    },
}

type Stub = CacheServiceClient<Channel>;

/// `peer_address -> rpc_stub`, populated on first use.
#[derive(Debug, Default)]
pub struct PeerPool {
    stubs: DashMap<String, Arc<OnceCell<Stub>>>,
}

impl PeerPool {
    pub fn new() -> Self {
        Self {
            stubs: DashMap::new(),
        }
    }

    /// Returns a reusable stub for `address`, opening an insecure channel
    /// on first contact. Concurrent first-contact callers for the same
    /// address share a single in-flight connect attempt.
    pub async fn stub_for(&self, address: &str) -> Result<Stub, PeerError> {
        let cell = self
            .stubs
            .entry(address.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let stub = cell
            .get_or_try_init(|| connect(address))
            .await?
            .clone();
        Ok(stub)
    }

    /// Number of peers contacted so far (diagnostics only).
    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }
}

async fn connect(address: &str) -> Result<Stub, PeerError> {
    let uri = format!("http://{address}");
    tracing::debug!(peer = address, "opening peer channel");
    let endpoint = Channel::from_shared(uri).map_err(|source| PeerError::InvalidAddress {
        address: address.to_string(),
        source,
    })?;
    let channel = endpoint
        .connect()
        .await
        .map_err(|source| PeerError::ConnectFailed {
            address: address.to_string(),
            source,
        })?;
    Ok(CacheServiceClient::new(channel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreachable_peer_surfaces_connect_error() {
        let pool = PeerPool::new();
        // Port 1 is reserved and never listening in CI sandboxes.
        let result = pool.stub_for("127.0.0.1:1").await;
        assert!(result.is_err());
    }

    #[test]
    fn starts_empty() {
        let pool = PeerPool::new();
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
    }
}
