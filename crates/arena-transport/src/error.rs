use crate::ConnectionId;

/// Errors raised while listening for, or talking to, a client socket.
///
/// None of these are fatal to the server: an accept failure skips one
/// client and a send/receive failure ends one connection.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The peer closed the connection before or during a send.
    #[error("connection {0} is closed")]
    ConnectionClosed(ConnectionId),

    /// Sending a frame failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving a frame failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Binding the listener, accepting a socket, or the WebSocket
    /// upgrade failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// `accept` was called after `shutdown`.
    #[error("transport shut down")]
    Shutdown,
}

impl TransportError {
    /// Wraps a WebSocket-level error as an I/O error of the given kind.
    #[cfg(feature = "websocket")]
    pub(crate) fn io(
        kind: std::io::ErrorKind,
        err: tokio_tungstenite::tungstenite::Error,
    ) -> std::io::Error {
        std::io::Error::new(kind, err)
    }
}
