//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding envelopes.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Deserialization failed — malformed JSON, a missing required
    /// field, or an unknown `type` discriminator.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
