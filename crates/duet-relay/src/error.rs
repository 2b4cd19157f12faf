//! Error types for the relay core.

use duet_protocol::RoomCode;

/// Why a room operation was refused.
///
/// None of these are fatal: each is reported back to the offending
/// connection as an `error` envelope and the connection stays open.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The join referenced a code with no live room behind it.
    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    /// The join targeted a room whose guest slot is already taken.
    #[error("room {0} is full")]
    RoomFull(RoomCode),

    /// The joining connection already occupies a slot somewhere.
    /// Refusing here keeps a connection in at most one room and keeps
    /// a room's two slots held by distinct connections.
    #[error("already in room {0}")]
    AlreadyInRoom(RoomCode),
}
