//! Unified error type for the server crate.

use duet_protocol::ProtocolError;
use duet_transport::TransportError;

/// Top-level error that wraps the layer-specific errors.
///
/// The `#[from]` attributes auto-generate `From` impls, so `?` converts
/// lower-layer errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
