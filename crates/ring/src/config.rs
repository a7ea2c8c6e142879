//! Ring-wide configuration constants and the config record built from them.
//!
//! Exposed as an explicit record (rather than ambient globals) so the
//! coordinator can be constructed with a config object instead of reaching
//! for free-floating constants — see `coordinator::CoordinatorConfig`.

/// Default number of virtual nodes placed per physical node.
pub const DEFAULT_VIRTUAL_NODES: usize = 256;

/// Default number of replicas a coordinator fans a write out to.
pub const DEFAULT_REPLICATION_FACTOR: usize = 3;

/// Construction-time configuration for a [`crate::Ring`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingConfig {
    /// Virtual nodes placed per physical node (`R_v` in the spec).
    pub virtual_nodes: usize,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            virtual_nodes: DEFAULT_VIRTUAL_NODES,
        }
    }
}

impl RingConfig {
    pub fn with_virtual_nodes(virtual_nodes: usize) -> Self {
        Self { virtual_nodes }
    }
}
