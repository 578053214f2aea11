//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type over the tool and transport
//! layers, used at the process edge.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from a transport binding.
    #[error("Transport error: {0}")]
    Transport(#[from] crate::core::transport::TransportError),
}
