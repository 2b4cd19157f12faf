//! # duet-server
//!
//! Matchmaking and state-relay server for two-player board games.
//!
//! The server allocates rooms identified by six-digit codes, pairs two
//! WebSocket connections per room, and relays whatever game state the
//! clients submit — it never validates moves or interprets the state.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use duet_server::RelayServerBuilder;
//!
//! # async fn run() -> Result<(), duet_server::ServerError> {
//! let server = RelayServerBuilder::new()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::ServerError;
pub use server::{RelayServer, RelayServerBuilder};
