//! Server configuration for the digifarm daemon.
//!
//! Command-line flags are optional; anything not given falls back to the defaults below.

/// Host the daemon binds when none is given.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Port the daemon binds when none is given.
pub const DEFAULT_PORT: u16 = 8080;
/// Path prefix every resource is mounted under.
pub const API_PREFIX: &str = "/api";

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host or IP address to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
    /// Whether to log at DEBUG instead of INFO.
    pub verbose: bool,
}

impl ServerConfig {
    /// Builds a configuration from optional overrides.
    pub fn new(host: Option<String>, port: Option<u16>, verbose: bool) -> Self {
        Self {
            host: host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: port.unwrap_or(DEFAULT_PORT),
            verbose,
        }
    }

    /// The `host:port` string handed to the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(None, None, false)
    }
}
