//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, bearer-token checks, the
//! protocol server and the transport bindings.

pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use security::{BearerError, validate_bearer};
pub use server::McpServer;
pub use transport::{HttpConfig, TransportConfig, TransportService, registry_for};
