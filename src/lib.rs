//! BigCommerce MCP Server Library
//!
//! This crate exposes read-only BigCommerce store operations (products,
//! customers, orders) as Model Context Protocol tools, over STDIO, SSE or
//! stateless HTTP.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Configuration, error handling, bearer auth, the protocol server
//!   and the transport bindings
//! - **domains**: Business logic organized by bounded contexts
//!   - **store**: HTTP client and response classification for the store API
//!   - **tools**: Tool descriptors, registry, dispatcher and formatting
//!
//! # Example
//!
//! ```rust,no_run
//! use bigcommerce_mcp_server::core::{Config, McpServer, TransportConfig, TransportService};
//! use bigcommerce_mcp_server::domains::tools::ToolRegistry;
//!
//! #[tokio::main]
//! async fn main() -> bigcommerce_mcp_server::Result<()> {
//!     let config = Config::from_env();
//!     let registry = ToolRegistry::discover(&config).await?;
//!     let server = McpServer::new(config, registry);
//!     TransportService::new(TransportConfig::Stdio).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
