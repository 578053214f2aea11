//! Dispatcher - resolves tool calls against the registry.
//!
//! Protocol faults (unknown tool, missing parameter, operation error) are
//! returned as [`ToolError`]. Upstream failures reported by an operation are
//! wrapped in a successful [`ResponseEnvelope`] with `isError` set.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::descriptor::ToolListing;
use super::error::ToolError;
use super::format::ResponseEnvelope;
use super::handlers::{ArgumentBag, OperationResult};
use super::registry::ToolRegistry;

/// Stateless front door to the tool registry.
///
/// Holds no per-call state, so clones can serve concurrent calls freely.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Discovery projection in registry order.
    pub fn list_tools(&self) -> Vec<ToolListing> {
        self.registry.listings()
    }

    /// Call a tool by name.
    #[instrument(skip(self, arguments), fields(tool = %name))]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: ArgumentBag,
    ) -> Result<ResponseEnvelope, ToolError> {
        let Some(tool) = self.registry.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        let arguments = tool.schema.validate(arguments).inspect_err(|e| {
            warn!("Rejected call to {}: {}", name, e);
        })?;

        info!("Calling tool {}", name);

        let outcome = AssertUnwindSafe(tool.operation.invoke(&arguments))
            .catch_unwind()
            .await
            .map_err(|_| ToolError::execution_failed(format!("tool {name} panicked")))?;

        let result = outcome.map_err(|e| {
            error!("Tool {} failed: {}", name, e);
            ToolError::execution_failed(e.to_string())
        })?;

        if let OperationResult::Failure(message) = &result {
            warn!("Tool {} reported failure: {}", name, message);
        }

        Ok(ResponseEnvelope::from_result(name, &result))
    }
}
