//! Consistent hash ring: deterministic key -> replica-list mapping.
//!
//! This crate provides the core placement abstraction for the cache
//! cluster:
//! - [`RingConfig`] — virtual-node count and related constants.
//! - [`Ring`] — the immutable ring itself, built once per process from a
//!   node list and queried with [`Ring::get_nodes`].

pub mod config;
mod position;
mod ring;

pub use config::{RingConfig, DEFAULT_REPLICATION_FACTOR, DEFAULT_VIRTUAL_NODES};
pub use position::hash_position;
pub use ring::Ring;
