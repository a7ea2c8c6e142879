//! Startup-time error taxonomy (spec §7: "configuration error" is fatal).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("own address {address:?} has no ':<port>' suffix to bind on")]
    MissingPort { address: String },

    #[error("own address {address:?} has a port that does not parse as u16: {source}")]
    InvalidPort {
        address: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("dotted address {address:?} is missing the '<service>' segment before ':<port>'")]
    MissingServiceSegment { address: String },
}
