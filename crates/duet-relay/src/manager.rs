//! Room lifecycle: the room table, the connection registry, and the
//! create/join/disconnect operations that keep both consistent.

use std::collections::HashMap;

use duet_protocol::{GameState, RoomCode};
use duet_transport::ConnectionId;
use rand::Rng;

use crate::room::{Room, Seat};
use crate::RelayError;

/// What a successful join hands back to the coordinator.
#[derive(Debug)]
pub struct JoinedRoom {
    /// The host to notify with `player_joined`. A joinable room always
    /// has its host seated (an empty room would have been reclaimed),
    /// but the coordinator treats this as best-effort rather than
    /// asserting it.
    pub host: Option<ConnectionId>,
    /// A snapshot of the room's current state for the joining side.
    pub game_state: GameState,
}

/// What clearing a slot on disconnect left behind.
#[derive(Debug)]
pub struct Disconnected {
    /// The room the connection was seated in.
    pub room_code: RoomCode,
    /// The seat it held.
    pub seat: Seat,
    /// The other occupant, if one remains — the notification target.
    pub peer: Option<ConnectionId>,
    /// True when the room became empty and was removed from the table.
    pub reclaimed: bool,
}

/// Owns every live room and the connection-to-room registry.
///
/// All methods are synchronous; callers serialize access (the server
/// holds the [`Relay`](crate::Relay) behind a mutex), so no operation
/// ever observes a half-updated table.
pub struct RoomManager {
    /// Live rooms, keyed by room code.
    rooms: HashMap<RoomCode, Room>,

    /// Maps each connection to the room it occupies a slot in.
    /// A connection appears here at most once (key invariant).
    conn_rooms: HashMap<ConnectionId, RoomCode>,
}

impl RoomManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
            conn_rooms: HashMap::new(),
        }
    }

    /// Draws a six-digit code not currently in use.
    ///
    /// Codes are unique among live rooms only; a reclaimed room's code
    /// goes back into the pool. The re-draw loop assumes the live-room
    /// count stays far below the 900,000-code space.
    fn generate_code(&self) -> RoomCode {
        let mut rng = rand::rng();
        loop {
            let code = RoomCode::new(
                rng.random_range(100_000..=999_999u32).to_string(),
            );
            if !self.rooms.contains_key(&code) {
                return code;
            }
        }
    }

    /// Creates a room with `conn` as host and registers the mapping.
    ///
    /// Infallible. The caller must ensure `conn` holds no other slot
    /// (the coordinator vacates any previous seat first).
    pub fn create_room(&mut self, conn: ConnectionId) -> RoomCode {
        let code = self.generate_code();
        self.rooms.insert(code.clone(), Room::new(conn));
        self.conn_rooms.insert(conn, code.clone());
        tracing::info!(room_code = %code, %conn, "room created");
        code
    }

    /// Seats `conn` as guest of the room behind `code`.
    ///
    /// Fails without mutating anything: `RoomNotFound` for a dead code,
    /// `RoomFull` when the guest slot is taken, `AlreadyInRoom` when
    /// `conn` occupies a slot anywhere (including hosting this very
    /// room — a room's two seats are always distinct connections).
    pub fn join_room(
        &mut self,
        conn: ConnectionId,
        code: &RoomCode,
    ) -> Result<JoinedRoom, RelayError> {
        if let Some(current) = self.conn_rooms.get(&conn) {
            return Err(RelayError::AlreadyInRoom(current.clone()));
        }

        let room = self
            .rooms
            .get_mut(code)
            .ok_or_else(|| RelayError::RoomNotFound(code.clone()))?;

        if room.occupant(Seat::Guest).is_some() {
            return Err(RelayError::RoomFull(code.clone()));
        }

        room.seat_guest(conn);
        let joined = JoinedRoom {
            host: room.occupant(Seat::Host),
            game_state: room.game_state().clone(),
        };
        self.conn_rooms.insert(conn, code.clone());
        tracing::info!(room_code = %code, %conn, "guest joined");
        Ok(joined)
    }

    /// Clears whatever slot `conn` holds.
    ///
    /// Idempotent: returns `None` when the connection is in no room
    /// (already cleared, or never seated). When the last occupant
    /// leaves, the room is removed from the table — reclaimed, not
    /// marked empty. The registry entry is removed last, always.
    pub fn disconnect(&mut self, conn: ConnectionId) -> Option<Disconnected> {
        let code = self.conn_rooms.get(&conn)?.clone();

        let outcome = match self.rooms.get_mut(&code) {
            Some(room) => match room.seat_of(conn) {
                Some(seat) => {
                    room.vacate(seat);
                    let peer = room.occupants().next();
                    let reclaimed = room.is_empty();
                    if reclaimed {
                        self.rooms.remove(&code);
                        tracing::info!(room_code = %code, "room reclaimed");
                    }
                    Some(Disconnected {
                        room_code: code.clone(),
                        seat,
                        peer,
                        reclaimed,
                    })
                }
                None => None,
            },
            None => None,
        };

        self.conn_rooms.remove(&conn);
        outcome
    }

    /// Mutable access to a live room, for the coordinator's relay step.
    pub fn room_mut(&mut self, code: &RoomCode) -> Option<&mut Room> {
        self.rooms.get_mut(code)
    }

    /// The room `conn` currently occupies a slot in, if any.
    pub fn room_of(&self, conn: ConnectionId) -> Option<&RoomCode> {
        self.conn_rooms.get(&conn)
    }

    /// True while a room lives behind `code`.
    pub fn contains(&self, code: &RoomCode) -> bool {
        self.rooms.contains_key(code)
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::new()
    }
}
