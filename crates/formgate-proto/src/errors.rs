//! Encoding and decoding errors.

use thiserror::Error;

use crate::Endpoint;

/// Convenience alias for payload operations.
pub type Result<T> = std::result::Result<T, ProtoError>;

/// Errors raised while encoding or decoding payload bodies.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// Body could not be serialized.
    #[error("failed to encode {endpoint} body: {source}")]
    Encode {
        /// Endpoint the body was destined for
        endpoint: Endpoint,
        /// Underlying serializer error
        #[source]
        source: serde_json::Error,
    },

    /// Body could not be parsed.
    #[error("failed to decode {endpoint} body: {source}")]
    Decode {
        /// Endpoint the body was received on
        endpoint: Endpoint,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },
}
