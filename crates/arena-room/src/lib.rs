//! Room lifecycle and round resolution for the RPS arena.
//!
//! All game state lives in one [`RoomRegistry`]. The registry is owned by
//! a single lobby task (actor model): every inbound event, disconnects
//! included, is applied to completion before the next one is looked at,
//! so the registry itself needs no locking.
//!
//! # Key types
//!
//! - [`RoomRegistry`] — rooms keyed by id, connection → room membership,
//!   join/leave/disconnect, and (in the `engine` module) choice submission
//!   and round resolution
//! - [`Room`] / [`Player`] — per-room state, players in join order
//! - [`Outbox`] — where outbound events go; [`ChannelOutbox`] in
//!   production, a recording fake in tests
//! - [`spawn_lobby`] / [`LobbyHandle`] — the actor wrapping a registry
//! - [`judge`] — the dominance table

mod engine;
mod error;
mod lobby;
mod outbox;
mod registry;
mod room;
mod rules;

pub use error::RoomError;
pub use lobby::{spawn_lobby, LobbyHandle, LobbyStats};
pub use outbox::{ChannelOutbox, ClientSender, Outbox};
pub use registry::RoomRegistry;
pub use room::{Player, Room, DEFAULT_PLAYER_NAME, MAX_PLAYERS};
pub use rules::judge;
