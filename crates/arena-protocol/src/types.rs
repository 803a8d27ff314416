//! Event types for the arena's wire format.
//!
//! Inbound events are [`ClientEvent`]s, outbound events are
//! [`ServerEvent`]s. Both are "adjacently tagged" serde enums: the variant
//! name goes in `"event"` (snake_case) and its payload in `"data"`.
//! Payload fields use camelCase because browser clients read them.

use std::fmt;
use std::str::FromStr;

use arena_transport::ConnectionId;
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Identifier of a room, supplied by clients.
///
/// Case-sensitive and otherwise arbitrary: `"R1"`, `"r1"` and `""` are
/// three different rooms. Serialized as a plain JSON string.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Creates a room id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RoomId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// Choice / Outcome
// ---------------------------------------------------------------------------

/// A committed hand for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// Every choice, in a fixed order. Handy for exhaustive tables.
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// The wire name of this choice.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the raw `player_choice` payload.
///
/// Matching is exact: `"Rock"` or `" rock"` are rejected.
impl FromStr for Choice {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rock" => Ok(Self::Rock),
            "paper" => Ok(Self::Paper),
            "scissors" => Ok(Self::Scissors),
            other => Err(ProtocolError::InvalidMessage(format!(
                "unknown choice {other:?}"
            ))),
        }
    }
}

/// A player's personal result for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    /// The opponent's outcome when this player got `self`.
    pub fn complement(self) -> Self {
        match self {
            Self::Win => Self::Lose,
            Self::Lose => Self::Win,
            Self::Draw => Self::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Draw => "draw",
        })
    }
}

// ---------------------------------------------------------------------------
// Client → Server
// ---------------------------------------------------------------------------

/// Payload of `join_room`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    /// The room to join (created if it doesn't exist yet).
    pub room_id: RoomId,
    /// Display name; blank or missing means the default name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Events a client can send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// `{"event":"join_room","data":{"roomId":"R1","name":"Alice"}}`
    JoinRoom(JoinRequest),

    /// `{"event":"leave_room"}`
    LeaveRoom,

    /// `{"event":"player_choice","data":"rock"}`
    ///
    /// Kept as the raw string: unknown values are not a decode error, the
    /// round engine drops them.
    PlayerChoice(String),

    /// Application-level keep-alive, answered with [`ServerEvent::Pong`].
    Ping {
        #[serde(rename = "clientTime")]
        client_time: u64,
    },
}

// ---------------------------------------------------------------------------
// Server → Client
// ---------------------------------------------------------------------------

/// One row of the `room_state` player list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub socket_id: ConnectionId,
    pub name: String,
    /// Whether a choice has been made. The choice itself stays hidden
    /// until the round resolves.
    #[serde(rename = "choice")]
    pub has_chosen: bool,
}

/// Payload of `room_state`: what everyone in the room may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    /// Players in join order.
    pub players: Vec<PlayerView>,
    /// Number of players with a choice set.
    pub ready_count: usize,
}

/// Payload of `round_result`, sent privately to each player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub you: Choice,
    pub opponent: Choice,
    pub outcome: Outcome,
}

/// Events the server sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// First event on every connection: tells the client its own id.
    Connected {
        #[serde(rename = "socketId")]
        socket_id: ConnectionId,
    },

    /// Broadcast to a room whenever its membership or readiness changes.
    RoomState(RoomSnapshot),

    /// Sent only to the connection whose request was rejected.
    RoomError(String),

    /// A player's private view of a resolved round.
    RoundResult(RoundResult),

    /// Reply to [`ClientEvent::Ping`]. `server_time` is milliseconds since
    /// the server started.
    Pong {
        #[serde(rename = "clientTime")]
        client_time: u64,
        #[serde(rename = "serverTime")]
        server_time: u64,
    },
}

// =========================================================================
// Tests
// =========================================================================
