//! The relay coordinator: interprets inbound envelopes, mutates the room
//! table, and fans updates out to the affected participants.

use std::collections::HashMap;

use duet_protocol::{ClientMessage, GameState, RoomCode, ServerMessage};
use duet_transport::ConnectionId;
use tokio::sync::mpsc;

use crate::manager::RoomManager;
use crate::room::Seat;

/// Channel sender for delivering outbound envelopes to a connection's
/// writer task.
pub type OutboundSender = mpsc::UnboundedSender<ServerMessage>;

/// The message-handling core.
///
/// Owns the [`RoomManager`] plus one outbound channel per registered
/// connection. Every method is synchronous — the server locks the relay
/// for the duration of one handling step, so all table mutation for a
/// message completes before the next message from any connection is
/// processed. Queueing onto the unbounded channels never suspends;
/// socket I/O happens later in the writer tasks.
pub struct Relay {
    rooms: RoomManager,

    /// Outbound channel per live connection. Sends to an entry whose
    /// receiver is gone are swallowed: notification is best-effort,
    /// never a correctness requirement.
    senders: HashMap<ConnectionId, OutboundSender>,
}

impl Relay {
    /// Creates a relay with an empty room table.
    pub fn new() -> Self {
        Self {
            rooms: RoomManager::new(),
            senders: HashMap::new(),
        }
    }

    /// Registers a connection's outbound channel. Called by the
    /// connection handler before the first message is dispatched.
    pub fn register(&mut self, conn: ConnectionId, sender: OutboundSender) {
        self.senders.insert(conn, sender);
    }

    /// Handles one decoded envelope from `conn`.
    pub fn on_message(&mut self, conn: ConnectionId, msg: ClientMessage) {
        match msg {
            ClientMessage::CreateRoom => self.handle_create(conn),
            ClientMessage::JoinRoom { room_id } => {
                self.handle_join(conn, room_id)
            }
            ClientMessage::MakeMove { room_id, mv } => {
                self.handle_move(room_id, mv.game_state)
            }
        }
    }

    /// Handles transport closure for `conn`.
    ///
    /// Clears the slot, best-effort notifies the remaining peer, and
    /// drops the outbound channel. Safe to call again for a connection
    /// that was already cleared.
    pub fn on_disconnect(&mut self, conn: ConnectionId) {
        if let Some(outcome) = self.rooms.disconnect(conn) {
            tracing::info!(
                room_code = %outcome.room_code,
                %conn,
                reclaimed = outcome.reclaimed,
                "participant disconnected"
            );
            if let Some(peer) = outcome.peer {
                self.send_to(peer, ServerMessage::PlayerDisconnected);
            }
        }
        self.senders.remove(&conn);
    }

    /// Sends an `error` envelope to `conn`. Used by the connection
    /// handler for undecodable messages; handling failures inside
    /// `on_message` go through the same envelope.
    pub fn report_error(&self, conn: ConnectionId, message: &str) {
        self.send_to(
            conn,
            ServerMessage::Error {
                message: message.to_string(),
            },
        );
    }

    /// Read access to the room table, for inspection in tests.
    pub fn rooms(&self) -> &RoomManager {
        &self.rooms
    }

    fn handle_create(&mut self, conn: ConnectionId) {
        // A connection holding a slot gets vacated first, exactly as a
        // disconnect would, so creating always succeeds and a connection
        // never occupies two rooms.
        if let Some(outcome) = self.rooms.disconnect(conn) {
            tracing::debug!(
                room_code = %outcome.room_code,
                %conn,
                "left previous room on create"
            );
            if let Some(peer) = outcome.peer {
                self.send_to(peer, ServerMessage::PlayerDisconnected);
            }
        }

        let code = self.rooms.create_room(conn);
        self.send_to(
            conn,
            ServerMessage::RoomCreated {
                room_id: code,
                player_id: Seat::Host.player_number(),
            },
        );
    }

    fn handle_join(&mut self, conn: ConnectionId, room_id: RoomCode) {
        match self.rooms.join_room(conn, &room_id) {
            Ok(joined) => {
                if let Some(host) = joined.host {
                    self.send_to(
                        host,
                        ServerMessage::PlayerJoined {
                            player_id: Seat::Guest.player_number(),
                            game_state: joined.game_state.clone(),
                        },
                    );
                }
                self.send_to(
                    conn,
                    ServerMessage::RoomJoined {
                        room_id,
                        player_id: Seat::Guest.player_number(),
                        game_state: joined.game_state,
                    },
                );
            }
            Err(e) => {
                tracing::debug!(room_code = %room_id, %conn, error = %e, "join refused");
                self.report_error(conn, &e.to_string());
            }
        }
    }

    fn handle_move(&mut self, room_id: RoomCode, next_state: Option<GameState>) {
        // No sender-membership check: whoever names a live room relays to
        // its occupants. A known permissive gap, kept deliberately.
        let Some(room) = self.rooms.room_mut(&room_id) else {
            tracing::debug!(room_code = %room_id, "make_move for unknown room, ignoring");
            return;
        };

        if let Some(state) = next_state {
            room.replace_state(state);
        }

        let update = ServerMessage::GameUpdate {
            game_state: room.game_state().clone(),
        };
        let targets: Vec<ConnectionId> = room.occupants().collect();
        for target in targets {
            self.send_to(target, update.clone());
        }
    }

    /// Fire-and-forget delivery. A missing or closed channel means the
    /// peer is gone; the envelope is dropped silently.
    fn send_to(&self, conn: ConnectionId, msg: ServerMessage) {
        if let Some(sender) = self.senders.get(&conn) {
            let _ = sender.send(msg);
        }
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}
