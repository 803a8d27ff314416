//! Transport abstraction layer for the RPS arena.
//!
//! Provides the [`Transport`] and [`Connection`] traits that keep the game
//! core free of any particular network protocol, plus the [`ConnectionId`]
//! handle used everywhere above this layer to address a single client.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket transport via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a connection.
///
/// Also the addressing handle for direct messages: the room layer stores
/// players under their connection id and the outbox delivers by it.
/// Serialized as a plain number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Source of client connections (the listening side).
///
/// The server's accept loop is written against this trait; which wire
/// protocol sits underneath is decided once, at bind time.
pub trait Transport: Send + Sync + 'static {
    type Connection: Connection;
    type Error: std::error::Error + Send + Sync;

    /// Waits until a client has connected and finished any handshake.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;

    /// Stops handing out connections; later `accept` calls fail.
    async fn shutdown(&self) -> Result<(), Self::Error>;
}

/// One connected client.
///
/// Methods take `&self` so one task can sit in [`recv`](Self::recv)
/// while another half of the same handler writes events out.
pub trait Connection: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync;

    /// Writes one frame holding `data`.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Reads the next data frame, skipping control frames.
    ///
    /// `Ok(None)` means the peer closed the connection.
    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Starts the closing handshake.
    async fn close(&self) -> Result<(), Self::Error>;

    /// The id this connection was assigned when accepted.
    fn id(&self) -> ConnectionId;
}
