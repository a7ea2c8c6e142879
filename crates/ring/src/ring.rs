//! The consistent hash ring: deterministic key -> replica-list mapping.

use std::collections::HashSet;

use crate::config::RingConfig;
use crate::position::hash_position;

/// A single virtual-node position on the ring.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    position: u32,
    node_id: String,
}

/// An immutable consistent hash ring over a fixed set of node identities.
///
/// Construction places `config.virtual_nodes` positions per physical node
/// by hashing `"{node_id}:{i}"`; the ring never changes shape after
/// `Ring::new` returns, so lookups need no synchronization (§5 of the
/// spec: "immutable after construction; safe to read concurrently
/// without synchronization").
#[derive(Debug, Clone)]
pub struct Ring {
    /// Virtual-node entries, sorted ascending by `position`.
    entries: Vec<Entry>,
    /// Unique node identities, in first-seen order.
    nodes: Vec<String>,
    config: RingConfig,
}

impl Ring {
    /// Builds a ring from an ordered list of node identities.
    ///
    /// Duplicate identities in `node_ids` contribute virtual nodes only
    /// once; `node_ids` order determines iteration order for tie-broken
    /// positions, keeping construction deterministic for a given input.
    pub fn new<I, S>(node_ids: I, config: RingConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut nodes = Vec::new();
        let mut seen = HashSet::new();
        for node_id in node_ids {
            let node_id = node_id.into();
            if seen.insert(node_id.clone()) {
                nodes.push(node_id);
            }
        }

        let mut entries = Vec::with_capacity(nodes.len() * config.virtual_nodes);
        for node_id in &nodes {
            for i in 0..config.virtual_nodes {
                let vnode_key = format!("{node_id}:{i}");
                entries.push(Entry {
                    position: hash_position(&vnode_key),
                    node_id: node_id.clone(),
                });
            }
        }
        entries.sort_by_key(|e| e.position);

        Self {
            entries,
            nodes,
            config,
        }
    }

    /// Number of distinct physical nodes in the ring.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of virtual-node entries (`R_v * node_count`, modulo
    /// hash collisions, which are retained as duplicates).
    pub fn token_count(&self) -> usize {
        self.entries.len()
    }

    /// The virtual-node count this ring was built with.
    pub fn virtual_nodes(&self) -> usize {
        self.config.virtual_nodes
    }

    /// All distinct node identities, in first-seen order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Finds up to `r` distinct nodes responsible for `key`, walking the
    /// ring clockwise from `key`'s hash.
    ///
    /// Returns at most `min(r, node_count())` entries. Returns an empty
    /// list if the ring has no nodes or `r == 0`.
    pub fn get_nodes(&self, key: &str, r: usize) -> Vec<String> {
        if self.entries.is_empty() || r == 0 {
            return Vec::new();
        }
        let r = r.min(self.nodes.len());

        let h = hash_position(key);
        // Leftmost index with position >= h; wraps to 0 if h exceeds every
        // position on the ring.
        let start = self.entries.partition_point(|e| e.position < h);

        let len = self.entries.len();
        let mut out = Vec::with_capacity(r);
        let mut seen = HashSet::with_capacity(r);
        let mut i = start;
        loop {
            if i == len {
                i = 0;
            }
            let node_id = &self.entries[i].node_id;
            if seen.insert(node_id.clone()) {
                out.push(node_id.clone());
                if out.len() == r {
                    break;
                }
            }
            i += 1;
        }
        out
    }

    /// Convenience wrapper around `get_nodes(key, 1)` for the single
    /// primary-owner case (used by tests and ad-hoc inspection; not part
    /// of the coordinator's replication path, which always asks for the
    /// full replica set).
    pub fn primary(&self, key: &str) -> Option<String> {
        self.get_nodes(key, 1).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_of(n: usize) -> Ring {
        let ids: Vec<String> = (0..n).map(|i| format!("node{i}:5005{i}")).collect();
        Ring::new(ids, RingConfig::with_virtual_nodes(8))
    }

    #[test]
    fn empty_ring_returns_nothing() {
        let ring = Ring::new(Vec::<String>::new(), RingConfig::default());
        assert_eq!(ring.get_nodes("key", 3), Vec::<String>::new());
        assert_eq!(ring.node_count(), 0);
        assert_eq!(ring.token_count(), 0);
    }

    #[test]
    fn zero_replicas_returns_nothing() {
        let ring = ring_of(3);
        assert!(ring.get_nodes("key", 0).is_empty());
    }

    #[test]
    fn token_count_matches_virtual_nodes_times_node_count() {
        let ring = ring_of(3);
        assert_eq!(ring.node_count(), 3);
        assert_eq!(ring.token_count(), 24);
    }

    #[test]
    fn get_nodes_is_deterministic() {
        let ring = ring_of(5);
        let a = ring.get_nodes("my_special_key", 3);
        let b = ring.get_nodes("my_special_key", 3);
        assert_eq!(a, b);
    }

    #[test]
    fn get_nodes_returns_distinct_members() {
        let ring = ring_of(5);
        let replicas = ring.get_nodes("chaos_key", 3);
        assert_eq!(replicas.len(), 3);
        let unique: HashSet<_> = replicas.iter().collect();
        assert_eq!(unique.len(), 3);
        for node in &replicas {
            assert!(ring.nodes().contains(node));
        }
    }

    #[test]
    fn replica_count_clamps_to_node_count() {
        let ring = ring_of(2);
        let replicas = ring.get_nodes("key", 10);
        assert_eq!(replicas.len(), 2);
    }

    #[test]
    fn full_replica_count_returns_every_node() {
        let ring = ring_of(4);
        let replicas = ring.get_nodes("any-key-at-all", ring.node_count());
        let expected: HashSet<_> = ring.nodes().iter().collect();
        let actual: HashSet<_> = replicas.iter().collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn duplicate_node_ids_are_not_double_counted() {
        let ring = Ring::new(
            vec!["a".to_string(), "b".to_string(), "a".to_string()],
            RingConfig::with_virtual_nodes(4),
        );
        assert_eq!(ring.node_count(), 2);
        assert_eq!(ring.token_count(), 8);
    }

    #[test]
    fn primary_matches_first_of_get_nodes() {
        let ring = ring_of(3);
        let first = ring.get_nodes("some-key", 1);
        assert_eq!(ring.primary("some-key"), first.into_iter().next());
    }

    #[test]
    fn distribution_is_roughly_even_with_full_vnode_count() {
        // S4: ~1/3 of 10,000 keys should land on each of 3 nodes as
        // primary, within a 5% tolerance, at R_v = 256.
        let ring = Ring::new(
            vec!["A:50051".to_string(), "B:50052".to_string(), "C:50053".to_string()],
            RingConfig::default(),
        );
        let mut counts = std::collections::HashMap::new();
        for i in 0..10_000 {
            let key = format!("key-{i}");
            let primary = ring.get_nodes(&key, 1).remove(0);
            *counts.entry(primary).or_insert(0u32) += 1;
        }
        for node in ring.nodes() {
            let count = *counts.get(node).unwrap_or(&0) as f64;
            let fraction = count / 10_000.0;
            assert!(
                (fraction - (1.0 / 3.0)).abs() < 0.05,
                "node {node} got fraction {fraction}"
            );
        }
    }
}
