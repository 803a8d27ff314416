//! Error types for the room layer.

use arena_protocol::RoomId;
use arena_transport::ConnectionId;

use crate::MAX_PLAYERS;

/// Errors that can occur during room operations.
///
/// The `Display` text of the join errors is what the client receives in
/// its `room_error` event.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room already holds [`MAX_PLAYERS`] players.
    #[error("room {0} is full ({max} players max)", max = MAX_PLAYERS)]
    RoomFull(RoomId),

    /// The connection already belongs to a room.
    #[error("connection {0} is already in room {1}")]
    AlreadyInRoom(ConnectionId, RoomId),

    /// The connection is not in any room.
    #[error("connection {0} is not in a room")]
    NotInRoom(ConnectionId),

    /// The lobby task's command channel is closed.
    #[error("lobby is unavailable")]
    Unavailable,
}
