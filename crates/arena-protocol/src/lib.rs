//! Wire protocol for the RPS arena.
//!
//! This crate defines what clients and the server say to each other:
//!
//! - **Types** ([`ClientEvent`], [`ServerEvent`], [`Choice`], [`Outcome`],
//!   etc.) — the named events that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those events are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding or when parsing a raw choice.
//!
//! # Wire shape
//!
//! Every frame is one JSON object naming the event and carrying its
//! payload, mirroring socket.io's `emit(name, data)`:
//!
//! ```text
//! {"event": "join_room", "data": {"roomId": "R1", "name": "Alice"}}
//! {"event": "player_choice", "data": "rock"}
//! {"event": "leave_room"}
//! ```
//!
//! The protocol layer knows nothing about rooms or connections; it only
//! knows how to serialize and deserialize events.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    Choice, ClientEvent, JoinRequest, Outcome, PlayerView, RoomId,
    RoomSnapshot, RoundResult, ServerEvent,
};
