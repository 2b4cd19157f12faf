//! A single room: two participant slots and the shared game state.

use duet_protocol::{default_game_state, GameState};
use duet_transport::ConnectionId;

/// One of the two participant positions within a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    /// The participant who created the room.
    Host,
    /// The participant who joined it.
    Guest,
}

impl Seat {
    /// The player number clients see: host is 1, guest is 2.
    pub fn player_number(self) -> u8 {
        match self {
            Seat::Host => 1,
            Seat::Guest => 2,
        }
    }
}

/// A matchmaking unit pairing at most two connections.
///
/// Invariants (upheld by [`RoomManager`](crate::RoomManager)):
/// - `host` and `guest` never hold the same connection
/// - a room with both slots empty is removed from the table, never kept
#[derive(Debug)]
pub struct Room {
    host: Option<ConnectionId>,
    guest: Option<ConnectionId>,
    game_state: GameState,
}

impl Room {
    /// Creates a room with `conn` seated as host and the server-defined
    /// initial game state.
    pub(crate) fn new(host: ConnectionId) -> Self {
        Self {
            host: Some(host),
            guest: None,
            game_state: default_game_state(),
        }
    }

    /// Returns the connection occupying the given seat, if any.
    pub fn occupant(&self, seat: Seat) -> Option<ConnectionId> {
        match seat {
            Seat::Host => self.host,
            Seat::Guest => self.guest,
        }
    }

    /// Returns the seat `conn` holds, if it is in this room.
    pub fn seat_of(&self, conn: ConnectionId) -> Option<Seat> {
        if self.host == Some(conn) {
            Some(Seat::Host)
        } else if self.guest == Some(conn) {
            Some(Seat::Guest)
        } else {
            None
        }
    }

    /// The connections currently seated, host first.
    pub fn occupants(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.host.into_iter().chain(self.guest)
    }

    /// True once both slots are empty — the room must then be reclaimed.
    pub fn is_empty(&self) -> bool {
        self.host.is_none() && self.guest.is_none()
    }

    pub(crate) fn seat_guest(&mut self, conn: ConnectionId) {
        debug_assert!(self.guest.is_none());
        self.guest = Some(conn);
    }

    pub(crate) fn vacate(&mut self, seat: Seat) {
        match seat {
            Seat::Host => self.host = None,
            Seat::Guest => self.guest = None,
        }
    }

    /// The last state a client reported (or the initial state).
    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    /// Replaces the stored state wholesale. The server never merges.
    pub fn replace_state(&mut self, state: GameState) {
        self.game_state = state;
    }
}
