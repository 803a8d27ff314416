//! # Arena
//!
//! Real-time rock-paper-scissors server over WebSockets.
//!
//! Clients connect, pick a room by name, and play rounds against whoever
//! else is in it. Each room holds at most two players. The server keeps
//! both choices hidden until the round resolves, then tells each player
//! what they threw, what their opponent threw, and who won.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use arena::prelude::*;
//!
//! # async fn run() -> Result<(), ArenaError> {
//! let server = ArenaServer::builder()
//!     .bind("0.0.0.0:3000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod server;

pub use config::{ServerConfig, DEFAULT_LOBBY_CHANNEL_SIZE, DEFAULT_PORT};
pub use error::ArenaError;
pub use server::{ArenaServer, ArenaServerBuilder};

/// Everything needed to run a server or talk to one.
pub mod prelude {
    pub use crate::{ArenaError, ArenaServer, ArenaServerBuilder, ServerConfig};
    pub use arena_protocol::{
        Choice, ClientEvent, Codec, JoinRequest, JsonCodec, Outcome,
        PlayerView, RoomId, RoomSnapshot, RoundResult, ServerEvent,
    };
    pub use arena_room::{LobbyHandle, LobbyStats};
    pub use arena_transport::ConnectionId;
}
