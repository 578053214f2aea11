//! Tool-specific error types.
//!
//! These are protocol faults: they abort a single call and surface as a
//! JSON-RPC error envelope. Upstream failures that an operation reports
//! normally travel as [`OperationResult::Failure`](super::OperationResult)
//! instead and never become a `ToolError`.

use thiserror::Error;

/// JSON-RPC code for an unknown tool or method.
pub const METHOD_NOT_FOUND: i32 = -32601;

/// JSON-RPC code for missing or malformed parameters.
pub const INVALID_PARAMS: i32 = -32602;

/// JSON-RPC code for failures while executing a tool.
pub const INTERNAL_ERROR: i32 = -32603;

/// Errors that can occur during tool discovery and dispatch.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// A parameter listed as required was absent from the call.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Arguments were present but could not be used by the operation.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool execution failed before producing a result.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Two descriptors were registered under the same name.
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    /// The registry could not be assembled.
    #[error("Tool discovery failed: {0}")]
    Discovery(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "missing parameter" error.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "discovery" error.
    pub fn discovery(msg: impl Into<String>) -> Self {
        Self::Discovery(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// The JSON-RPC error code this fault is reported with.
    pub fn code(&self) -> i32 {
        match self {
            Self::NotFound(_) => METHOD_NOT_FOUND,
            Self::MissingParameter(_) => INVALID_PARAMS,
            Self::InvalidArguments(_)
            | Self::ExecutionFailed(_)
            | Self::DuplicateTool(_)
            | Self::Discovery(_)
            | Self::Internal(_) => INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ToolError::not_found("x").code(), -32601);
        assert_eq!(ToolError::missing_parameter("store_Hash").code(), -32602);
        assert_eq!(ToolError::execution_failed("boom").code(), -32603);
        assert_eq!(ToolError::invalid_arguments("bad").code(), -32603);
    }

    #[test]
    fn test_missing_parameter_names_parameter() {
        let err = ToolError::missing_parameter("order_id");
        assert_eq!(err.to_string(), "Missing required parameter: order_id");
    }
}
