//! Peer-discovery and bind-port derivation from a node's own identity
//! string (spec §6's CLI surface).
//!
//! Two environments are distinguished by the presence of a `.` in the
//! node's own address: a dot-free address (`node1:50051`) is the local
//! Docker Compose shape with a hardcoded three-node peer list; a dotted
//! address (`cache-node-0.cache-service:50051`) is the Kubernetes
//! StatefulSet shape, where peers are derived by substituting the
//! ordinal in the hostname.

use crate::error::NodeError;

const STATEFULSET_PORT: u16 = 50051;

/// Fixed peer list used when `my_address` has no dot (spec §6).
const COMPOSE_PEERS: [&str; 3] = ["node1:50051", "node2:50052", "node3:50053"];

/// Returns `(my_address, replication_factor)`-sized peer list for the
/// cluster `my_address` belongs to (including `my_address` itself — the
/// ring is built over every node, not just the others).
pub fn discover_peers(my_address: &str, replication_factor: usize) -> Result<Vec<String>, NodeError> {
    if !my_address.contains('.') {
        return Ok(COMPOSE_PEERS.iter().map(|s| s.to_string()).collect());
    }

    // `<pod>.<service>:<port>`, pod = `<hostname_base>-<ordinal>`.
    let mut dot_parts = my_address.splitn(2, '.');
    let my_hostname = dot_parts.next().expect("splitn always yields at least one part");
    let rest = dot_parts
        .next()
        .ok_or_else(|| NodeError::MissingServiceSegment {
            address: my_address.to_string(),
        })?;
    let service_name = rest
        .split(':')
        .next()
        .ok_or_else(|| NodeError::MissingServiceSegment {
            address: my_address.to_string(),
        })?;
    let hostname_base = my_hostname.rsplit_once('-').map_or(my_hostname, |(base, _)| base);

    Ok((0..replication_factor)
        .map(|i| format!("{hostname_base}-{i}.{service_name}:{STATEFULSET_PORT}"))
        .collect())
}

/// Extracts the bind port: the substring after the last `:` in
/// `my_address`.
pub fn bind_port(my_address: &str) -> Result<u16, NodeError> {
    let port_str = my_address
        .rsplit(':')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| NodeError::MissingPort {
            address: my_address.to_string(),
        })?;
    port_str
        .parse()
        .map_err(|source| NodeError::InvalidPort {
            address: my_address.to_string(),
            source,
        })
}
