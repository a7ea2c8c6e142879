//! Read-through client for the legacy key-value HTTP service.
//!
//! On a local cache miss the coordinator falls back to this client. Every
//! failure mode — timeout, transport error, non-200 status, malformed
//! body — is coerced to an ordinary miss; nothing here ever propagates an
//! error out to a `Get` caller (see the spec's §7 error-propagation
//! policy: `Get` is maximally forgiving).

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Total request timeout for the legacy lookup (spec §6: `LEGACY_TIMEOUT`).
pub const LEGACY_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum LegacyError {
    #[error("legacy client could not be constructed: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct LegacyRecord {
    #[allow(dead_code)]
    key: String,
    value: String,
}

/// The outcome of a legacy lookup: the spec never lets this fail outward,
/// so there is no `Err` variant here — only hit/miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyLookup {
    Hit(Vec<u8>),
    Miss,
}

/// HTTP client for `GET {base}/legacy/data/{key}`.
pub struct LegacyClient {
    http: reqwest::Client,
    base_url: String,
}

impl LegacyClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LegacyError> {
        let http = reqwest::Client::builder()
            .timeout(LEGACY_TIMEOUT)
            .build()
            .map_err(LegacyError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Looks up `key` against the legacy service. Every failure — a
    /// timeout, a transport error, any non-200 status, or a body that
    /// doesn't match the expected JSON shape — is logged and coerced to
    /// [`LegacyLookup::Miss`].
    pub async fn get(&self, key: &str) -> LegacyLookup {
        let url = format!("{}/legacy/data/{}", self.base_url, key);
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(key, error = %err, "legacy lookup failed (transport/timeout)");
                return LegacyLookup::Miss;
            }
        };

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(key, "legacy lookup: ordinary miss");
            return LegacyLookup::Miss;
        }
        if !response.status().is_success() {
            tracing::warn!(key, status = %response.status(), "legacy lookup: unexpected status");
            return LegacyLookup::Miss;
        }

        match response.json::<LegacyRecord>().await {
            Ok(record) => LegacyLookup::Hit(record.value.into_bytes()),
            Err(err) => {
                tracing::warn!(key, error = %err, "legacy lookup: malformed body");
                LegacyLookup::Miss
            }
        }
    }
}
