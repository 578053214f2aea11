//! Transport configuration types.

use serde::{Deserialize, Serialize};

use super::{TransportError, TransportResult};

/// Transport selected for this process. Exactly one runs per invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TransportConfig {
    /// Standard input/output transport (default for MCP).
    #[default]
    Stdio,

    /// Server-sent events stream with a companion message endpoint.
    Sse(HttpConfig),

    /// Stateless JSON-RPC over HTTP POST.
    StreamableHttp(HttpConfig),
}

/// Listen address and HTTP options shared by the SSE and HTTP transports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Path for JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

pub const DEFAULT_PORT: u16 = 3000;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_rpc_path() -> String {
    "/mcp".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

impl HttpConfig {
    /// Load HTTP settings from environment variables.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);
        Self {
            port,
            host,
            enable_cors,
            ..Default::default()
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TransportConfig {
    /// Select a transport from the command-line flags.
    ///
    /// Fails when both networked transports are requested.
    pub fn from_flags(sse: bool, streamable_http: bool, http: HttpConfig) -> TransportResult<Self> {
        match (sse, streamable_http) {
            (true, true) => Err(TransportError::Conflict(
                "--sse and --streamable-http cannot be used together".to_string(),
            )),
            (true, false) => Ok(Self::Sse(http)),
            (false, true) => Ok(Self::StreamableHttp(http)),
            (false, false) => Ok(Self::Stdio),
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            Self::Sse(cfg) => format!("SSE on {}/sse", cfg.address()),
            Self::StreamableHttp(cfg) => format!("HTTP on {}{}", cfg.address(), cfg.rpc_path),
        }
    }

    /// Check if this transport is the standard STDIO mode.
    pub fn is_stdio(&self) -> bool {
        matches!(self, Self::Stdio)
    }
}
