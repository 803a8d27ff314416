//! `ArenaServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → lobby.

use std::sync::Arc;
use std::time::{Duration, Instant};

use arena_protocol::{Codec, JsonCodec};
use arena_room::{spawn_lobby, LobbyHandle};
use arena_transport::{Transport, WebSocketTransport};

use crate::handler::handle_connection;
use crate::{ArenaError, ServerConfig};

/// Shared server state passed to each connection handler task.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) lobby: LobbyHandle,
    pub(crate) codec: C,
    pub(crate) idle_timeout: Option<Duration>,
    /// Reference point for `pong.serverTime`.
    pub(crate) started_at: Instant,
}

/// Builder for configuring and starting an arena server.
///
/// # Example
///
/// ```rust,no_run
/// use arena::ArenaServerBuilder;
///
/// # async fn run() -> Result<(), arena::ArenaError> {
/// let server = ArenaServerBuilder::new()
///     .bind("0.0.0.0:3000")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct ArenaServerBuilder {
    config: ServerConfig,
}

impl ArenaServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Creates a builder from a complete configuration.
    pub fn from_config(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets (or clears) the idle timeout for connections.
    pub fn idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.idle_timeout = timeout;
        self
    }

    /// Sets the lobby command queue capacity.
    pub fn lobby_channel_size(mut self, size: usize) -> Self {
        self.config.lobby_channel_size = size;
        self
    }

    /// Binds the listener and starts the lobby.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`.
    pub async fn build(self) -> Result<ArenaServer<JsonCodec>, ArenaError> {
        if self.config.lobby_channel_size == 0 {
            return Err(ArenaError::Config(
                "lobby channel size must be greater than 0".into(),
            ));
        }

        let transport = WebSocketTransport::bind(&self.config.bind_addr).await?;

        let state = Arc::new(ServerState {
            lobby: spawn_lobby(self.config.lobby_channel_size),
            codec: JsonCodec,
            idle_timeout: self.config.idle_timeout,
            started_at: Instant::now(),
        });

        Ok(ArenaServer { transport, state })
    }
}

impl Default for ArenaServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound arena server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct ArenaServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
}

impl ArenaServer<JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> ArenaServerBuilder {
        ArenaServerBuilder::new()
    }
}

impl<C: Codec> ArenaServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Returns a handle to the lobby, e.g. to read its stats.
    pub fn lobby(&self) -> LobbyHandle {
        self.state.lobby.clone()
    }

    /// Runs the accept loop.
    ///
    /// Spawns one handler task per accepted connection. A failed accept
    /// (bad upgrade request, reset socket) is logged and skipped; the loop
    /// only ends once the transport has been shut down.
    pub async fn run(mut self) -> Result<(), ArenaError> {
        tracing::info!(addr = ?self.local_addr().ok(), "arena server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(arena_transport::TransportError::Shutdown) => {
                    tracing::info!("arena server stopped accepting");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(error = %e, "accept failed");
                }
            }
        }
    }
}
