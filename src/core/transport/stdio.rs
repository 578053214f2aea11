//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP, served by rmcp. Stdout carries
//! protocol frames only; all logging goes to stderr.

use rmcp::ServiceExt;
use tracing::{info, warn};

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until the client disconnects or Ctrl-C.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!(
            "Ready - {} tools available via stdin/stdout",
            server.tool_count()
        );

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let cancel = service.cancellation_token();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, closing server");
                    cancel.cancel();
                }
                Err(e) => warn!("Failed to listen for Ctrl-C: {}", e),
            }
        });

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;

        info!("STDIO transport finished: {:?}", reason);
        Ok(())
    }
}
