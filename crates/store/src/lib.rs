//! In-process local cache store.
//!
//! A node's slice of the replicated key space: an unordered mapping from
//! key to opaque byte value, created empty at startup and mutated in
//! place by `Set` (self-writes and replicated writes alike). There is no
//! deletion, eviction, or TTL in the core protocol — see the top-level
//! spec's Non-goals.

use dashmap::DashMap;

/// Shared-mutable `key -> value` map, safe for concurrent readers and
/// writers. Per-key writes are atomic with respect to readers (no torn
/// values): `DashMap` shards its internal locking so concurrent requests
/// on distinct keys make independent progress, matching the concurrency
/// model in the spec (§5).
#[derive(Debug, Default)]
pub struct LocalStore {
    data: DashMap<String, Vec<u8>>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Unconditionally replaces the value for `key`.
    pub fn put(&self, key: impl Into<String>, value: Vec<u8>) {
        self.data.insert(key.into(), value);
    }

    /// Looks up `key`, cloning the value out if present.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.data.get(key).map(|entry| entry.value().clone())
    }

    /// Number of keys currently held (diagnostics only).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn put_then_get_roundtrips() {
        let store = LocalStore::new();
        store.put("k", b"v".to_vec());
        assert_eq!(store.get("k"), Some(b"v".to_vec()));
    }

    #[test]
    fn get_on_missing_key_is_none() {
        let store = LocalStore::new();
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn put_replaces_previous_value() {
        let store = LocalStore::new();
        store.put("k", b"first".to_vec());
        store.put("k", b"second".to_vec());
        assert_eq!(store.get("k"), Some(b"second".to_vec()));
    }

    #[test]
    fn empty_value_is_a_valid_hit() {
        let store = LocalStore::new();
        store.put("k", Vec::new());
        assert_eq!(store.get("k"), Some(Vec::new()));
    }

    #[test]
    fn concurrent_writers_do_not_tear_values() {
        let store = Arc::new(LocalStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..500 {
                    store.put("shared", vec![i as u8; 64]);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        let value = store.get("shared").unwrap();
        assert!(value.iter().all(|&b| b == value[0]), "torn write detected");
    }
}
