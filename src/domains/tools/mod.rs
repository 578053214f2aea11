//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are read-only store API operations that MCP clients can call.
//!
//! ## Architecture
//!
//! - `definitions/` - Store tool definitions (products, customers, orders)
//! - `descriptor.rs` - Tool descriptor and declarative parameter schema
//! - `handlers.rs` - Operation capability and operation results
//! - `registry.rs` - Immutable registry built once by discovery
//! - `dispatcher.rs` - Name resolution, parameter check, invocation
//! - `format.rs` - Response envelope and payload formatting
//! - `error.rs` - Protocol faults
//!
//! ## Adding a New Tool
//!
//! 1. Add a tool struct with `NAME`, `DESCRIPTION`, `schema()` and
//!    `descriptor()` in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::discover`
//!
//! Transports pick it up automatically through the dispatcher.

pub mod definitions;
mod descriptor;
mod dispatcher;
mod error;
mod format;
mod handlers;
mod registry;

#[cfg(test)]
pub(crate) mod testing;

pub use descriptor::{ParameterKind, ParameterSchema, ParameterSpec, ToolDescriptor, ToolListing};
pub use dispatcher::Dispatcher;
pub use error::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND, ToolError};
pub use format::{EnvelopeMeta, PayloadShape, ResponseEnvelope, TextContent};
pub use handlers::{ArgumentBag, OperationResult, ToolOperation, ValidatedArguments};
pub use registry::ToolRegistry;
