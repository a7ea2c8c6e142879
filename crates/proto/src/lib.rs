//! Generated wire contract for the cache `CacheService`.
//!
//! The RPC transport and the message codecs themselves are out of scope
//! for the core of this system (see the top-level spec); this crate is
//! the thin generated-code boundary the core is written against. Nothing
//! here is hand-maintained beyond `proto/cache.proto` and `build.rs`.

tonic::include_proto!("kvring.cache");

/// Request-metadata key that marks an inbound `Set` as peer-originated.
///
/// Presence (value `"true"`) tells the receiving node to behave as a
/// replica: apply the write locally and return, without fanning out
/// further. This is the only thing standing between the coordinator
/// protocol and unbounded replication loops.
pub const REPLICATION_MARKER_KEY: &str = "is-replication";

/// The metadata value paired with [`REPLICATION_MARKER_KEY`].
pub const REPLICATION_MARKER_VALUE: &str = "true";
