//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (and a `.env` file, if present) on top of defaults.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::transport::HttpConfig;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Upstream store API configuration.
    pub store: StoreConfig,

    /// Bearer-token gate for the HTTP transport.
    pub auth: AuthConfig,

    /// Listen address shared by the SSE and HTTP transports.
    pub http: HttpConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Upstream store API configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store hash of the configured store.
    pub store_hash: Option<String>,

    /// API account access token, sent as `X-Auth-Token`.
    pub access_token: Option<String>,

    /// Base URL of the store API.
    pub api_base_url: String,

    /// Per-request timeout for upstream calls, in seconds.
    pub timeout_secs: u64,
}

/// Bearer-token gate configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret expected in `Authorization: Bearer <token>`.
    /// If None, the gate is disabled.
    pub bearer_token: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("store_hash", &self.store_hash)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

pub const DEFAULT_API_BASE_URL: &str = "https://api.bigcommerce.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_hash: None,
            access_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "bigcommerce-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            store: StoreConfig::default(),
            auth: AuthConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

/// Read a variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(name) = env_var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = env_var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.store.store_hash = env_var("BIGCOMMERCE_STORE_HASH");
        config.store.access_token = env_var("BIGCOMMERCE_ACCESS_TOKEN");

        if let Some(url) = env_var("BIGCOMMERCE_API_URL") {
            config.store.api_base_url = url;
        }

        if let Some(timeout) = env_var("MCP_UPSTREAM_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.store.timeout_secs = secs,
                Err(_) => warn!(
                    "Ignoring invalid MCP_UPSTREAM_TIMEOUT_SECS={:?}, using {}s",
                    timeout, DEFAULT_TIMEOUT_SECS
                ),
            }
        }

        config.auth.bearer_token = env_var("MCP_AUTH_TOKEN");
        config.http = HttpConfig::from_env();

        config
    }

    /// Log which optional settings are active.
    ///
    /// Kept separate from [`Config::from_env`] because logging is set up
    /// from the loaded config.
    pub fn log_summary(&self) {
        match &self.store.store_hash {
            Some(hash) => info!("Configured store: {}", hash),
            None => warn!("BIGCOMMERCE_STORE_HASH not set"),
        }
        if self.store.access_token.is_none() {
            warn!("BIGCOMMERCE_ACCESS_TOKEN not set - store tools will be unavailable");
        }
        if self.auth.bearer_token.is_some() {
            info!("Bearer token authentication enabled for /mcp");
        }
        info!("Upstream timeout: {}s", self.store.timeout_secs);
    }
}
