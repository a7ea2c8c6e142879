//! The coordinator/replica engine — the heart of the system.
//!
//! Classifies inbound `Set` calls as coordinator- or replica-originated
//! via the replication marker, fans coordinator writes out to the ring's
//! replica set plus persistence, and answers `Get` from the local store
//! with a legacy-store fallback on miss.

use std::sync::Arc;

use legacy::{LegacyClient, LegacyLookup};
use peers::PeerPool;
use persistence::PersistenceWriter;
use ring::Ring;
use store::LocalStore;

use crate::config::CoordinatorConfig;
use crate::error::CoordinatorError;

/// Outcome of a `Get`: either the bytes found in the local store or the
/// legacy fallback, or nothing. There is no error case — see
/// [`CoordinatorError`]'s doc comment and spec §7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetOutcome {
    Found(Vec<u8>),
    NotFound,
}

pub struct Coordinator {
    config: CoordinatorConfig,
    ring: Ring,
    store: Arc<LocalStore>,
    peers: Arc<PeerPool>,
    legacy: Arc<LegacyClient>,
    persistence: Option<Arc<PersistenceWriter>>,
}

impl Coordinator {
    pub fn new(
        config: CoordinatorConfig,
        ring: Ring,
        store: Arc<LocalStore>,
        peers: Arc<PeerPool>,
        legacy: Arc<LegacyClient>,
        persistence: Option<Arc<PersistenceWriter>>,
    ) -> Self {
        Self {
            config,
            ring,
            store,
            peers,
            legacy,
            persistence,
        }
    }

    pub fn my_address(&self) -> &str {
        &self.config.my_address
    }

    /// Handles an inbound `Set`. `is_replication` reflects whether the
    /// caller (the RPC layer) found the `is-replication` metadata entry
    /// on the request — this is the entire loop-break mechanism: a
    /// replica `Set` touches only the local store and returns, issuing
    /// no further RPCs and no persistence write.
    pub async fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        is_replication: bool,
    ) -> Result<(), CoordinatorError> {
        if is_replication {
            self.store.put(key.to_string(), value);
            return Ok(());
        }

        let targets = self.ring.get_nodes(key, self.config.replication_factor);
        tracing::debug!(key, ?targets, "coordinating set");

        let mut join_set = tokio::task::JoinSet::new();

        if let Some(persistence) = self.persistence.clone() {
            let key = key.to_string();
            let value = value.clone();
            join_set.spawn(async move {
                persistence
                    .upsert(&key, &value)
                    .await
                    .map_err(CoordinatorError::from)
            });
        }

        for target in targets {
            if target == self.config.my_address {
                self.store.put(key.to_string(), value.clone());
                continue;
            }
            let peers = Arc::clone(&self.peers);
            let key = key.to_string();
            let value = value.clone();
            join_set.spawn(async move { replicate_to_peer(&peers, &target, key, value).await });
        }

        let mut first_error = None;
        while let Some(joined) = join_set.join_next().await {
            let result = joined?;
            if let Err(err) = result {
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Handles an inbound `Get`: local store first, legacy fallback on
    /// miss. A legacy hit is returned but never written back into the
    /// local store (spec §4.6 step 2 — no read-through caching).
    pub async fn get(&self, key: &str) -> GetOutcome {
        if let Some(value) = self.store.get(key) {
            return GetOutcome::Found(value);
        }
        match self.legacy.get(key).await {
            LegacyLookup::Hit(value) => GetOutcome::Found(value),
            LegacyLookup::Miss => GetOutcome::NotFound,
        }
    }
}

async fn replicate_to_peer(
    peers: &PeerPool,
    target: &str,
    key: String,
    value: Vec<u8>,
) -> Result<(), CoordinatorError> {
    let mut stub = peers
        .stub_for(target)
        .await
        .map_err(|source| CoordinatorError::PeerUnreachable {
            peer: target.to_string(),
            source,
        })?;

    let mut request = tonic::Request::new(proto::SetRequest { key, value });
    request.metadata_mut().insert(
        proto::REPLICATION_MARKER_KEY,
        proto::REPLICATION_MARKER_VALUE.parse().expect("static metadata value is valid ascii"),
    );

    stub.set(request)
        .await
        .map(|_| ())
        .map_err(|source| CoordinatorError::PeerRejected {
            peer: target.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator_for(my_address: &str, nodes: &[&str]) -> Coordinator {
        let ring = Ring::new(
            nodes.iter().map(|s| s.to_string()),
            ring::RingConfig::default(),
        );
        let config = CoordinatorConfig::new(my_address);
        Coordinator::new(
            config,
            ring,
            Arc::new(LocalStore::new()),
            Arc::new(PeerPool::new()),
            Arc::new(LegacyClient::new("http://127.0.0.1:1").unwrap()),
            None,
        )
    }

    #[tokio::test]
    async fn replica_set_never_fans_out_or_persists() {
        // Single-node ring so a coordinator write would be a no-op peer
        // fan-out anyway; the point of this test is that the
        // `is_replication` short-circuit runs before any targets are
        // even computed.
        let coordinator = coordinator_for("node1:50051", &["node1:50051"]);
        let result = coordinator.set("k", b"v".to_vec(), true).await;
        assert!(result.is_ok());
        assert_eq!(coordinator.get("k").await, GetOutcome::Found(b"v".to_vec()));
    }

    #[tokio::test]
    async fn coordinator_set_on_single_node_ring_writes_locally() {
        let coordinator = coordinator_for("node1:50051", &["node1:50051"]);
        let result = coordinator.set("k", b"v".to_vec(), false).await;
        assert!(result.is_ok());
        assert_eq!(coordinator.get("k").await, GetOutcome::Found(b"v".to_vec()));
    }

    #[tokio::test]
    async fn coordinator_set_fails_when_a_peer_is_unreachable() {
        // node2 is in the ring but nothing is listening there, so the
        // peer fan-out must fail the whole call.
        let coordinator = coordinator_for("node1:50051", &["node1:50051", "node2:50052"]);
        let result = coordinator.set("k", b"v".to_vec(), false).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn get_on_miss_with_no_legacy_hit_returns_not_found() {
        let coordinator = coordinator_for("node1:50051", &["node1:50051"]);
        assert_eq!(coordinator.get("missing").await, GetOutcome::NotFound);
    }
}
