//! Configuration Module
//!
//! Loads server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which cache implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    /// Entries expire after the default TTL
    Ttl,
    /// Entries never expire
    Simple,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ttl" => Ok(CacheBackend::Ttl),
            "simple" => Ok(CacheBackend::Simple),
            other => Err(format!("unknown cache backend: {}", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache implementation to serve
    pub backend: CacheBackend,
    /// Default TTL in seconds for the TTL backend
    pub default_ttl: u64,
    /// Sweep period in seconds, None = derived from the default TTL
    pub cleanup_interval: Option<u64>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - `ttl` or `simple` (default: ttl)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Sweep period in seconds (default: derived)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.backend),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").or(defaults.cleanup_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
        }
    }

    /// Default TTL as a Duration.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    /// Explicit sweep period as a Duration, if one was configured.
    pub fn cleanup_interval(&self) -> Option<Duration> {
        self.cleanup_interval.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Ttl,
            default_ttl: 300,
            cleanup_interval: None,
            server_port: 3000,
        }
    }
}

/// Reads and parses an env var; missing or unparsable values yield None.
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
