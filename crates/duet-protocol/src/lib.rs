//! Wire protocol for the duet relay server.
//!
//! This crate defines the language that clients and the server speak:
//!
//! - **Types** ([`ClientMessage`], [`ServerMessage`], [`RoomCode`]) —
//!   the message envelopes that travel on the wire.
//! - **State** ([`GameState`], [`default_game_state`]) — the opaque
//!   game-state value the server stores and forwards but never
//!   interprets.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how envelopes are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while encoding
//!   or decoding.
//!
//! The protocol layer sits between transport (raw frames) and the relay
//! core. It knows nothing about connections or rooms beyond their
//! identifiers.

mod codec;
mod error;
mod state;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use state::{default_game_state, GameState};
pub use types::{ClientMessage, MovePayload, RoomCode, ServerMessage};
