//! Error taxonomy for the coordinator's fan-out (spec §7).
//!
//! `Set` is strict: any failure anywhere in the fan-out or persistence
//! set fails the call, with the underlying error kind surfaced. There is
//! no partial-success reporting and no retry inside the core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("could not reach peer {peer}: {source}")]
    PeerUnreachable {
        peer: String,
        #[source]
        source: peers::PeerError,
    },

    #[error("peer {peer} rejected the write: {source}")]
    PeerRejected {
        peer: String,
        #[source]
        source: tonic::Status,
    },

    #[error("persistence upsert failed: {0}")]
    Persistence(#[from] persistence::PersistenceError),

    #[error("fan-out task panicked: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
