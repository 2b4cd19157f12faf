//! Per-connection handler: outbound writer task plus the receive loop.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Register an outbound channel with the relay
//!   2. Spawn a writer task draining that channel onto the socket
//!   3. Loop: receive frames → decode → dispatch under the relay lock
//!   4. On transport closure, the drop guard fires `on_disconnect`

use std::sync::Arc;

use duet_protocol::{ClientMessage, Codec, ServerMessage};
use duet_transport::{Connection, ConnectionId, WebSocketConnection};
use tokio::sync::mpsc;

use crate::server::ServerState;
use crate::ServerError;

/// Drop guard that clears a connection's room slot when the handler
/// exits, so `on_disconnect` runs exactly once even if the handler
/// panics. `Drop` is synchronous, so the async lock is taken in a
/// fire-and-forget task.
struct DisconnectGuard<C: Codec> {
    conn_id: ConnectionId,
    state: Arc<ServerState<C>>,
}

impl<C: Codec> Drop for DisconnectGuard<C> {
    fn drop(&mut self) {
        let conn_id = self.conn_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            state.relay.lock().await.on_disconnect(conn_id);
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), ServerError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (tx, rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.relay.lock().await.register(conn_id, tx);
    let guard = DisconnectGuard {
        conn_id,
        state: Arc::clone(&state),
    };

    // The writer owns the outbound half. It stops when the relay drops
    // the channel sender (on disconnect) or the socket rejects a write.
    let writer = tokio::spawn(outbound_loop(
        conn.clone(),
        rx,
        Arc::clone(&state),
    ));

    loop {
        match conn.recv().await {
            Ok(Some(data)) => {
                match state.codec.decode::<ClientMessage>(&data) {
                    Ok(msg) => {
                        state.relay.lock().await.on_message(conn_id, msg);
                    }
                    Err(e) => {
                        // Malformed input never kills the connection;
                        // the sender just gets an error envelope.
                        tracing::debug!(%conn_id, error = %e, "undecodable message");
                        state
                            .relay
                            .lock()
                            .await
                            .report_error(conn_id, &e.to_string());
                    }
                }
            }
            Ok(None) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        }
    }

    // Guard drop fires on_disconnect, which releases the outbound
    // sender; the writer then drains whatever is queued and exits.
    drop(guard);
    let _ = writer.await;
    let _ = conn.close().await;
    Ok(())
}

/// Drains the outbound channel onto the socket.
///
/// Send failures mean the peer is gone; delivery is best-effort, so the
/// loop just stops and leaves cleanup to the receive side.
async fn outbound_loop<C: Codec>(
    conn: WebSocketConnection,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    state: Arc<ServerState<C>>,
) {
    while let Some(msg) = rx.recv().await {
        let bytes = match state.codec.encode(&msg) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(conn_id = %conn.id(), error = %e, "encode failed");
                continue;
            }
        };
        if conn.send(&bytes).await.is_err() {
            break;
        }
    }
}
