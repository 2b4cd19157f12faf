//! The opaque game-state value and its server-defined initial shape.

use serde_json::{json, Value};

/// The shared game state a room carries.
///
/// The server is deliberately state-blind: it stores and forwards this
/// value but never interprets its contents. A structured JSON value
/// (rather than a typed board schema) keeps the relay generic and leaves
/// all game rules on the clients. The accepted tradeoff is that a buggy
/// or malicious client can submit an arbitrary state and the server will
/// faithfully propagate it.
pub type GameState = Value;

/// Builds the state a freshly created room starts with.
///
/// This is the only point where the server defines the state's shape:
/// an empty 3×3 board, player 1 to move, and six nesting cups per player
/// (two each of small/medium/large). The keys are fixed — the deployed
/// clients read them verbatim.
pub fn default_game_state() -> GameState {
    json!({
        "board": [[null, null, null], [null, null, null], [null, null, null]],
        "current_player": 1,
        "player1_cups": cups(1),
        "player2_cups": cups(2),
    })
}

fn cups(player: u8) -> Value {
    let sizes = ["small", "small", "medium", "medium", "large", "large"];
    Value::Array(
        sizes
            .iter()
            .map(|size| json!({ "size": size, "player": player }))
            .collect(),
    )
}
