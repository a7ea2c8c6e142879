//! Coordinator-wide configuration.
//!
//! Exposed as an explicit record (per the design notes: `REPLICATION_FACTOR`
//! is "a compile-time constant in intent" but should be threaded through as
//! config, not an ambient global) rather than a bare constant.

/// Replicas a coordinator fans a write out to (spec §6: `REPLICATION_FACTOR`).
pub const DEFAULT_REPLICATION_FACTOR: usize = 3;

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// This node's own identity, as it appears in the ring and in peers'
    /// node lists (`<host>:<port>` or `<pod>.<service>:<port>`).
    pub my_address: String,
    pub replication_factor: usize,
}

impl CoordinatorConfig {
    pub fn new(my_address: impl Into<String>) -> Self {
        Self {
            my_address: my_address.into(),
            replication_factor: DEFAULT_REPLICATION_FACTOR,
        }
    }
}
