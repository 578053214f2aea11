//! Tool operation capability.
//!
//! Every tool descriptor carries one [`ToolOperation`]. Operations receive an
//! argument bag that has already passed the required-parameter check and
//! return an [`OperationResult`]; they only return `Err` when they cannot
//! run at all.

use serde_json::{Map, Value};

use super::error::ToolError;

/// Arguments of a tool call, keyed by parameter name.
pub type ArgumentBag = Map<String, Value>;

/// An argument bag in which every required parameter is present.
///
/// Only [`ParameterSchema::validate`](super::ParameterSchema::validate) can
/// build one, so operations never see a bag that skipped validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedArguments(ArgumentBag);

impl ValidatedArguments {
    pub(super) fn new(bag: ArgumentBag) -> Self {
        Self(bag)
    }

    /// Look up an argument, treating JSON `null` as absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// Borrow the underlying bag.
    pub fn as_map(&self) -> &ArgumentBag {
        &self.0
    }
}

/// Outcome of an operation that ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    /// Upstream response body, or the empty-result sentinel.
    Success(Value),

    /// Human-readable description of what went wrong upstream.
    Failure(String),
}

impl OperationResult {
    /// Create a successful result.
    pub fn success(payload: Value) -> Self {
        Self::Success(payload)
    }

    /// Create a failed result.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// The `{data: [], meta: {total: 0}}` payload used for empty bodies.
    pub fn empty() -> Self {
        Self::Success(serde_json::json!({ "data": [], "meta": { "total": 0 } }))
    }
}

/// Capability implemented by every callable tool.
#[async_trait::async_trait]
pub trait ToolOperation: Send + Sync {
    /// Run the operation.
    ///
    /// Upstream problems are reported as [`OperationResult::Failure`]; an
    /// `Err` means the operation could not be attempted.
    async fn invoke(&self, arguments: &ValidatedArguments) -> Result<OperationResult, ToolError>;
}
