//! CLI surface (spec §6): a single positional argument, the node's own
//! in-cluster address.

use clap::Parser;

/// Runs one cache node.
#[derive(Debug, Parser)]
#[command(name = "node")]
pub struct Args {
    /// This node's own address, e.g. `node1:50051` or
    /// `cache-node-0.cache-service:50051`.
    pub address: String,

    /// Postgres connection string for the write-through persistence
    /// layer. Absent or unreachable disables persistence (soft-fail).
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}
