//! Write-through persistence into a durable relational store.
//!
//! Upserts `(key, value)` pairs into `kv_store(key TEXT PRIMARY KEY, value
//! BYTEA)` through a pooled connection. Pool construction can fail at
//! startup (the database may simply not be reachable yet); callers in
//! the server shell are expected to treat that as a soft failure and run
//! in memory-only mode rather than refuse to start (spec §4.5).

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

/// Minimum pooled connections (spec §6: `DB_POOL = [1, 10]`).
pub const DB_POOL_MIN: u32 = 1;
/// Maximum pooled connections (spec §6: `DB_POOL = [1, 10]`).
pub const DB_POOL_MAX: u32 = 10;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("upsert of key {key:?} failed: {source}")]
    Upsert {
        key: String,
        #[source]
        source: sqlx::Error,
    },
}

/// A connected writer against `kv_store`. Construction is the only
/// fallible step that call sites are expected to recover from; once
/// connected, `upsert` failures are reported, not swallowed (a coordinator
/// `Set` fails the client call on a persistence error — spec §7).
pub struct PersistenceWriter {
    pool: PgPool,
}

impl PersistenceWriter {
    /// Connects a pool of `[DB_POOL_MIN, DB_POOL_MAX]` connections to
    /// `database_url`. Returns the underlying `sqlx::Error` on failure so
    /// the caller can log it and disable persistence rather than treat
    /// it as fatal.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .min_connections(DB_POOL_MIN)
            .max_connections(DB_POOL_MAX)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Upserts `(key, value)`, matching `ON CONFLICT (key) DO UPDATE`.
    pub async fn upsert(&self, key: &str, value: &[u8]) -> Result<(), PersistenceError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = $2",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|source| {
            tracing::error!(key, error = %source, "upsert failed");
            PersistenceError::Upsert {
                key: key.to_string(),
                source,
            }
        })?;
        Ok(())
    }
}
