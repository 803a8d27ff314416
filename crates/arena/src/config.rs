//! Server configuration.

use std::time::Duration;

use crate::ArenaError;

/// Default listening port when neither `ARENA_ADDR` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 3000;

/// Default capacity of the lobby's command queue.
pub const DEFAULT_LOBBY_CHANNEL_SIZE: usize = 256;

/// Settings for an [`ArenaServer`](crate::ArenaServer).
///
/// Start from `ServerConfig::default()` and override what you need, or
/// read everything from the environment with [`from_env`](Self::from_env).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the WebSocket listener binds to.
    pub bind_addr: String,

    /// Close a connection after this long without traffic.
    ///
    /// `None` keeps idle connections open forever; a player waiting for an
    /// opponent may legitimately send nothing for a long time. Clients
    /// that want a timeout should send `ping` events.
    pub idle_timeout: Option<Duration>,

    /// Capacity of the lobby command queue. Handlers wait when it's full.
    pub lobby_channel_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
            idle_timeout: None,
            lobby_channel_size: DEFAULT_LOBBY_CHANNEL_SIZE,
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `ARENA_ADDR` | full bind address, wins over `PORT` |
    /// | `PORT` | port on `0.0.0.0` (default 3000) |
    /// | `ARENA_IDLE_TIMEOUT_SECS` | idle timeout; `0` or unset disables it |
    /// | `ARENA_LOBBY_CHANNEL_SIZE` | lobby queue capacity, must be > 0 |
    ///
    /// # Errors
    /// [`ArenaError::Config`] when a variable is set but unusable.
    pub fn from_env() -> Result<Self, ArenaError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads variables through
    /// `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArenaError> {
        let mut config = Self::default();

        if let Some(addr) = lookup("ARENA_ADDR") {
            config.bind_addr = addr;
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = parse("PORT", &port)?;
            config.bind_addr = format!("0.0.0.0:{port}");
        }

        if let Some(secs) = lookup("ARENA_IDLE_TIMEOUT_SECS") {
            let secs: u64 = parse("ARENA_IDLE_TIMEOUT_SECS", &secs)?;
            config.idle_timeout =
                (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(size) = lookup("ARENA_LOBBY_CHANNEL_SIZE") {
            let size: usize = parse("ARENA_LOBBY_CHANNEL_SIZE", &size)?;
            if size == 0 {
                return Err(ArenaError::Config(
                    "ARENA_LOBBY_CHANNEL_SIZE must be greater than 0".into(),
                ));
            }
            config.lobby_channel_size = size;
        }

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ArenaError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        ArenaError::Config(format!("{key}={value:?}: {e}"))
    })
}
