//! Room lifecycle and connection-relay core for the duet server.
//!
//! This crate is the heart of the server: it pairs two connections per
//! room, relays whatever game state they submit, and reclaims rooms
//! deterministically on disconnect.
//!
//! # Key types
//!
//! - [`RoomManager`] — room table, connection registry, code generation,
//!   and the create/join/disconnect lifecycle
//! - [`Relay`] — the message-handling coordinator; interprets inbound
//!   envelopes and fans updates out through per-connection channels
//! - [`Room`] / [`Seat`] — one matchmaking unit and its two slots
//! - [`RelayError`] — why a join was refused
//!
//! Every entry point is synchronous: a caller holding a lock on the
//! [`Relay`] performs all shared-state mutation for one message before
//! any other message is handled. Outbound delivery goes through
//! unbounded channels, so queueing a response never suspends.

mod error;
mod manager;
mod relay;
mod room;

pub use error::RelayError;
pub use manager::{Disconnected, JoinedRoom, RoomManager};
pub use relay::{OutboundSender, Relay};
pub use room::{Room, Seat};
