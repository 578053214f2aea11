//! Transport service - orchestrates different transport types.
//!
//! This service provides a unified interface for starting the MCP server
//! with the binding selected on the command line.

use tracing::{info, warn};

use super::http::HttpTransport;
use super::sse::SseTransport;
use super::stdio::StdioTransport;
use super::{TransportConfig, TransportResult};
use crate::core::McpServer;
use crate::domains::tools::{ToolError, ToolRegistry};

/// Apply the discovery-failure policy for the selected binding.
///
/// STDIO has nothing to offer without tools and propagates the error. The
/// networked bindings keep serving `/health` with an empty registry.
pub fn registry_for(
    transport: &TransportConfig,
    discovered: Result<ToolRegistry, ToolError>,
) -> Result<ToolRegistry, ToolError> {
    match discovered {
        Ok(registry) => Ok(registry),
        Err(e) if transport.is_stdio() => Err(e),
        Err(e) => {
            warn!("{}; serving an empty tool list", e);
            Ok(ToolRegistry::empty())
        }
    }
}

/// Transport service - manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Log information about the configured transport.
    pub fn log_info(&self) {
        info!("Starting transport: {}", self.config.description());
    }

    /// Start the transport with the given MCP server.
    ///
    /// This method blocks until the transport is shut down.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        self.log_info();

        match self.config {
            TransportConfig::Stdio => StdioTransport::run(server).await,
            TransportConfig::Sse(cfg) => SseTransport::new(cfg).run(server).await,
            TransportConfig::StreamableHttp(cfg) => HttpTransport::new(cfg).run(server).await,
        }
    }
}
