//! Per-connection handler: greeting, decoding, and event routing.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Register with the lobby and send `connected`
//!   2. Loop: forward decoded client events to the lobby, and write the
//!      lobby's outgoing events back to the socket
//!   3. On close, error, or idle timeout, queue the disconnect

use std::pin::Pin;
use std::sync::Arc;

use arena_protocol::{ClientEvent, Codec, ServerEvent};
use arena_room::LobbyHandle;
use arena_transport::{Connection, ConnectionId, WebSocketConnection};
use tokio::sync::mpsc;
use tokio::time::{Instant, Sleep};

use crate::server::ServerState;
use crate::ArenaError;

/// Drop guard that tells the lobby a connection is gone.
///
/// Cleanup runs even if the handler returns early with an error or panics.
/// `Drop` is synchronous, so the disconnect is queued from a spawned task.
struct LobbyGuard {
    conn: ConnectionId,
    lobby: LobbyHandle,
}

impl Drop for LobbyGuard {
    fn drop(&mut self) {
        let conn = self.conn;
        let lobby = self.lobby.clone();
        // No runtime left means the lobby is gone too.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        runtime.spawn(async move {
            let _ = lobby.disconnect(conn).await;
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), ArenaError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (tx, mut outgoing) = mpsc::unbounded_channel();
    state.lobby.connect(conn_id, tx).await?;
    let _guard = LobbyGuard {
        conn: conn_id,
        lobby: state.lobby.clone(),
    };

    send_event(
        &conn,
        &state.codec,
        &ServerEvent::Connected { socket_id: conn_id },
    )
    .await?;

    let mut idle: Option<Pin<Box<Sleep>>> = state
        .idle_timeout
        .map(|timeout| Box::pin(tokio::time::sleep(timeout)));

    loop {
        tokio::select! {
            received = conn.recv() => {
                let data = match received {
                    Ok(Some(data)) => data,
                    Ok(None) => {
                        tracing::info!(%conn_id, "connection closed cleanly");
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(%conn_id, error = %e, "recv error");
                        break;
                    }
                };

                if let (Some(sleep), Some(timeout)) =
                    (idle.as_mut(), state.idle_timeout)
                {
                    sleep.as_mut().reset(Instant::now() + timeout);
                }

                handle_frame(&conn, &state, conn_id, &data).await?;
            }

            event = outgoing.recv() => {
                let Some(event) = event else {
                    tracing::debug!(%conn_id, "lobby dropped the connection");
                    break;
                };
                send_event(&conn, &state.codec, &event).await?;
            }

            () = wait_idle(&mut idle) => {
                tracing::info!(%conn_id, "connection timed out");
                let _ = conn.close().await;
                break;
            }
        }
    }

    // _guard drops here → lobby disconnect fires.
    Ok(())
}

/// Decodes one inbound frame and routes it.
///
/// Frames that aren't a known event are logged and dropped; the client
/// gets no reply.
async fn handle_frame<C: Codec>(
    conn: &WebSocketConnection,
    state: &ServerState<C>,
    conn_id: ConnectionId,
    data: &[u8],
) -> Result<(), ArenaError> {
    let event: ClientEvent = match state.codec.decode(data) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(%conn_id, error = %e, "failed to decode event");
            return Ok(());
        }
    };

    match event {
        ClientEvent::Ping { client_time } => {
            let pong = ServerEvent::Pong {
                client_time,
                server_time: state.started_at.elapsed().as_millis() as u64,
            };
            send_event(conn, &state.codec, &pong).await
        }
        event => Ok(state.lobby.dispatch(conn_id, event).await?),
    }
}

/// Resolves when the idle timer fires, or never if there is none.
async fn wait_idle(idle: &mut Option<Pin<Box<Sleep>>>) {
    match idle {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}

/// Encodes and sends one server event.
async fn send_event(
    conn: &WebSocketConnection,
    codec: &impl Codec,
    event: &ServerEvent,
) -> Result<(), ArenaError> {
    let bytes = codec.encode(event)?;
    conn.send(&bytes).await.map_err(ArenaError::Transport)?;
    Ok(())
}
