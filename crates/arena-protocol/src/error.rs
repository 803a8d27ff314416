//! Error types for the protocol layer.
//!
//! Each crate in the arena defines its own error enum, so a
//! `ProtocolError` always means a serialization or parsing problem, never
//! a networking or room-management one.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, an unknown event name, a missing
    /// `roomId`, or a payload of the wrong JSON type.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The message decoded but is not meaningful, e.g. a choice outside
    /// `rock`/`paper`/`scissors`.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
