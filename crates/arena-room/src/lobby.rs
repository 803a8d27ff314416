//! Lobby actor: the single Tokio task that owns the room registry.
//!
//! Connection handlers never touch rooms directly. They send commands
//! through an mpsc channel and the actor applies them one at a time, so
//! every event (a disconnect included) is handled to completion before
//! the next one starts.

use arena_protocol::{ClientEvent, JoinRequest};
use arena_transport::ConnectionId;
use tokio::sync::{mpsc, oneshot};

use crate::{ChannelOutbox, ClientSender, RoomError, RoomRegistry};

/// Commands sent to the lobby actor.
enum LobbyCommand {
    /// A new connection; events for it go to `sender`.
    Connect {
        conn: ConnectionId,
        sender: ClientSender,
    },

    /// A decoded event from a connection.
    Event {
        conn: ConnectionId,
        event: ClientEvent,
    },

    /// The connection is gone (closed, failed, or timed out).
    Disconnect { conn: ConnectionId },

    /// Request current counters.
    Stats { reply: oneshot::Sender<LobbyStats> },
}

/// Counters reported by [`LobbyHandle::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LobbyStats {
    /// Active rooms.
    pub rooms: usize,
    /// Registered connections, whether in a room or not.
    pub connections: usize,
}

/// Handle to the running lobby actor.
///
/// Cheap to clone; every connection handler holds one.
#[derive(Clone)]
pub struct LobbyHandle {
    sender: mpsc::Sender<LobbyCommand>,
}

impl LobbyHandle {
    /// Registers a connection so it can receive events.
    pub async fn connect(
        &self,
        conn: ConnectionId,
        sender: ClientSender,
    ) -> Result<(), RoomError> {
        self.send(LobbyCommand::Connect { conn, sender }).await
    }

    /// Queues a client event (fire-and-forget).
    pub async fn dispatch(
        &self,
        conn: ConnectionId,
        event: ClientEvent,
    ) -> Result<(), RoomError> {
        self.send(LobbyCommand::Event { conn, event }).await
    }

    /// Queues the implicit leave for a terminated connection.
    pub async fn disconnect(&self, conn: ConnectionId) -> Result<(), RoomError> {
        self.send(LobbyCommand::Disconnect { conn }).await
    }

    /// Asks the actor for its current counters.
    pub async fn stats(&self) -> Result<LobbyStats, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(LobbyCommand::Stats { reply: reply_tx }).await?;
        reply_rx.await.map_err(|_| RoomError::Unavailable)
    }

    async fn send(&self, cmd: LobbyCommand) -> Result<(), RoomError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| RoomError::Unavailable)
    }
}

/// The actor state. Runs inside its own task.
struct LobbyActor {
    registry: RoomRegistry<ChannelOutbox>,
    receiver: mpsc::Receiver<LobbyCommand>,
}

impl LobbyActor {
    /// Processes commands until every handle is dropped.
    async fn run(mut self) {
        tracing::info!("lobby started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                LobbyCommand::Connect { conn, sender } => {
                    self.registry.outbox_mut().register(conn, sender);
                }
                LobbyCommand::Event { conn, event } => {
                    self.handle_event(conn, event);
                }
                LobbyCommand::Disconnect { conn } => {
                    // Not being in a room is the common case here.
                    let _ = self.registry.handle_disconnect(conn);
                    self.registry.outbox_mut().deregister(conn);
                }
                LobbyCommand::Stats { reply } => {
                    let _ = reply.send(LobbyStats {
                        rooms: self.registry.room_count(),
                        connections: self.registry.outbox().client_count(),
                    });
                }
            }
        }

        tracing::info!("lobby stopped");
    }

    fn handle_event(&mut self, conn: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::JoinRoom(JoinRequest { room_id, name }) => {
                // The client already got a room_error; nothing else to do.
                let _ = self.registry.join_room(conn, room_id, name.as_deref());
            }
            ClientEvent::LeaveRoom => {
                if let Err(e) = self.registry.leave_room(conn) {
                    tracing::debug!(%conn, error = %e, "leave ignored");
                }
            }
            ClientEvent::PlayerChoice(raw) => {
                self.registry.submit_choice(conn, &raw);
            }
            ClientEvent::Ping { .. } => {
                tracing::debug!(%conn, "ping reached the lobby, ignoring");
            }
        }
    }
}

/// Spawns the lobby actor and returns a handle to it.
///
/// `channel_size` bounds the command queue; when it fills up, handlers
/// wait.
pub fn spawn_lobby(channel_size: usize) -> LobbyHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = LobbyActor {
        registry: RoomRegistry::new(ChannelOutbox::new()),
        receiver: rx,
    };
    tokio::spawn(actor.run());

    LobbyHandle { sender: tx }
}
