//! Transport layer for the MCP server.
//!
//! This module provides three bindings over the same tool dispatcher:
//! - **STDIO**: Standard input/output, served by rmcp (default)
//! - **SSE**: Long-lived event stream per session plus a message endpoint
//! - **HTTP**: Stateless JSON-RPC over POST with bearer-token auth
//!
//! Exactly one binding runs per process, selected from command-line flags.
//! The SSE and HTTP bindings share the JSON-RPC processor in [`jsonrpc`].

mod config;
mod error;
mod service;

pub mod http;
pub mod jsonrpc;
pub mod sse;
pub mod stdio;

pub use config::{HttpConfig, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use service::{TransportService, registry_for};

/// Resolve on Ctrl-C, used for graceful shutdown of the networked bindings.
pub(crate) async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Interrupt received, shutting down"),
        Err(e) => {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
