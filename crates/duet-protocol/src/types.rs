//! Message envelopes for the duet wire format.
//!
//! Every message on the wire is a JSON object with a `type` discriminator
//! (`#[serde(tag = "type", rename_all = "snake_case")]`). Field names use
//! the camelCase the clients expect (`roomId`, `playerId`, `gameState`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::GameState;

/// The externally-visible identifier clients use to join a room.
///
/// Six decimal digits, drawn from [100000, 999999]. Unique only among
/// currently-live rooms — a code may be handed out again after its room
/// is reclaimed.
///
/// Newtype over `String` so a room code can't be confused with any other
/// string on an API boundary. `#[serde(transparent)]` keeps the wire
/// representation a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Creates a room code from its string form.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The `move` field of a `make_move` envelope.
///
/// Only `gameState` matters to the server; any other keys a client puts
/// in here are ignored. When `gameState` is absent the room's stored
/// state is left unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovePayload {
    #[serde(
        rename = "gameState",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub game_state: Option<GameState>,
}

/// Client → Server envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Allocate a new room; the sender becomes its host.
    CreateRoom,

    /// Take the guest slot of an existing room.
    JoinRoom {
        #[serde(rename = "roomId")]
        room_id: RoomCode,
    },

    /// Replace the room's game state and fan it out to both players.
    MakeMove {
        #[serde(rename = "roomId")]
        room_id: RoomCode,
        #[serde(rename = "move")]
        mv: MovePayload,
    },
}

/// Server → Client envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// To the creator: room allocated, you are player 1.
    RoomCreated {
        #[serde(rename = "roomId")]
        room_id: RoomCode,
        #[serde(rename = "playerId")]
        player_id: u8,
    },

    /// To the joiner: you are player 2, here is the current state.
    RoomJoined {
        #[serde(rename = "roomId")]
        room_id: RoomCode,
        #[serde(rename = "playerId")]
        player_id: u8,
        #[serde(rename = "gameState")]
        game_state: GameState,
    },

    /// To the host: the guest slot was taken.
    PlayerJoined {
        #[serde(rename = "playerId")]
        player_id: u8,
        #[serde(rename = "gameState")]
        game_state: GameState,
    },

    /// To every present occupant: the shared state was replaced.
    GameUpdate {
        #[serde(rename = "gameState")]
        game_state: GameState,
    },

    /// To the remaining occupant: your peer's transport closed.
    PlayerDisconnected,

    /// To the sender of a message that could not be handled.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    //! The wire shapes are fixed by the deployed clients. These tests pin
    //! the exact JSON each envelope produces and parses.

    use serde_json::json;

    use super::*;

    #[test]
    fn room_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomCode::new("123456")).unwrap();
        assert_eq!(json, "\"123456\"");
    }

    #[test]
    fn room_code_display() {
        assert_eq!(RoomCode::new("654321").to_string(), "654321");
    }

    #[test]
    fn create_room_parses() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"create_room"}"#).unwrap();
        assert_eq!(msg, ClientMessage::CreateRoom);
    }

    #[test]
    fn join_room_parses_room_id() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"join_room","roomId":"123456"}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            ClientMessage::JoinRoom {
                room_id: RoomCode::new("123456")
            }
        );
    }

    #[test]
    fn make_move_parses_game_state() {
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"make_move","roomId":"123456","move":{"gameState":{"board":[]}}}"#,
        )
        .unwrap();
        match msg {
            ClientMessage::MakeMove { room_id, mv } => {
                assert_eq!(room_id.as_str(), "123456");
                assert_eq!(mv.game_state, Some(json!({"board": []})));
            }
            other => panic!("expected MakeMove, got {other:?}"),
        }
    }

    #[test]
    fn make_move_without_game_state_parses_as_none() {
        // Clients may send extra keys in `move` and omit gameState
        // entirely; both must decode.
        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"make_move","roomId":"123456","move":{"from":"hand"}}"#,
        )
        .unwrap();
        match msg {
            ClientMessage::MakeMove { mv, .. } => {
                assert_eq!(mv.game_state, None);
            }
            other => panic!("expected MakeMove, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_fails_to_parse() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"type":"fly_to_moon"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn garbage_fails_to_parse() {
        let result: Result<ClientMessage, _> =
            serde_json::from_slice(b"not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn room_created_json_shape() {
        let msg = ServerMessage::RoomCreated {
            room_id: RoomCode::new("123456"),
            player_id: 1,
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "room_created");
        assert_eq!(json["roomId"], "123456");
        assert_eq!(json["playerId"], 1);
    }

    #[test]
    fn room_joined_json_shape() {
        let msg = ServerMessage::RoomJoined {
            room_id: RoomCode::new("123456"),
            player_id: 2,
            game_state: json!({"board": []}),
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "room_joined");
        assert_eq!(json["roomId"], "123456");
        assert_eq!(json["playerId"], 2);
        assert_eq!(json["gameState"], json!({"board": []}));
    }

    #[test]
    fn player_joined_json_shape() {
        let msg = ServerMessage::PlayerJoined {
            player_id: 2,
            game_state: json!({}),
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "player_joined");
        assert_eq!(json["playerId"], 2);
    }

    #[test]
    fn game_update_json_shape() {
        let msg = ServerMessage::GameUpdate {
            game_state: json!({"current_player": 2}),
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "game_update");
        assert_eq!(json["gameState"]["current_player"], 2);
    }

    #[test]
    fn player_disconnected_json_shape() {
        let json =
            serde_json::to_string(&ServerMessage::PlayerDisconnected).unwrap();
        assert_eq!(json, r#"{"type":"player_disconnected"}"#);
    }

    #[test]
    fn error_json_shape() {
        let msg = ServerMessage::Error {
            message: "room 123456 not found".into(),
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "room 123456 not found");
    }
}
