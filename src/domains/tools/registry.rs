//! Tool Registry - central registration of all tools.
//!
//! The registry is assembled once at process start by [`ToolRegistry::discover`]
//! and is read-only afterwards, so it is shared behind an `Arc` without any
//! locking.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use super::definitions::{
    GetAllCustomersTool, GetAllOrdersTool, GetAllProductsTool, GetOrderByIdTool,
    GetOrderProductsTool, GetProductByIdTool,
};
use super::descriptor::{ToolDescriptor, ToolListing};
use super::error::ToolError;
use crate::core::config::Config;
use crate::domains::store::StoreClient;

/// Immutable, ordered set of tool descriptors.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// A registry with no tools, served when discovery fails on a
    /// networked transport.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry, rejecting duplicate names.
    pub fn from_descriptors(tools: Vec<ToolDescriptor>) -> Result<Self, ToolError> {
        let mut seen = HashSet::new();
        for tool in &tools {
            if !seen.insert(tool.name.as_str()) {
                return Err(ToolError::DuplicateTool(tool.name.clone()));
            }
        }
        Ok(Self { tools })
    }

    /// Discover every tool backed by the configured store.
    ///
    /// Fails when no API credential is configured or the upstream client
    /// cannot be built.
    pub async fn discover(config: &Config) -> Result<Self, ToolError> {
        let client = Arc::new(StoreClient::new(&config.store)?);

        let registry = Self::from_descriptors(vec![
            GetAllProductsTool::descriptor(client.clone()),
            GetProductByIdTool::descriptor(client.clone()),
            GetAllCustomersTool::descriptor(client.clone()),
            GetAllOrdersTool::descriptor(client.clone()),
            GetOrderByIdTool::descriptor(client.clone()),
            GetOrderProductsTool::descriptor(client),
        ])?;

        info!("Discovered {} tools", registry.len());
        Ok(registry)
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Discovery projection of every tool, in registration order.
    pub fn listings(&self) -> Vec<ToolListing> {
        self.tools.iter().map(ToolDescriptor::listing).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::testing::{StaticOperation, descriptor};
    use crate::domains::tools::OperationResult;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.store.access_token = Some("token".to_string());
        config
    }

    #[tokio::test]
    async fn test_discover_registers_all_tools() {
        let registry = ToolRegistry::discover(&test_config()).await.unwrap();
        let names = registry.tool_names();
        assert_eq!(
            names,
            vec![
                "get_all_products",
                "get_product_by_id",
                "get_all_customers",
                "get_all_orders",
                "get_order_by_id",
                "get_order_products",
            ]
        );
    }

    #[tokio::test]
    async fn test_discover_is_deterministic() {
        let first = ToolRegistry::discover(&test_config()).await.unwrap();
        let second = ToolRegistry::discover(&test_config()).await.unwrap();
        assert_eq!(first.listings(), second.listings());
    }

    #[tokio::test]
    async fn test_discover_requires_credential() {
        let config = Config::default();
        let err = ToolRegistry::discover(&config).await.unwrap_err();
        assert!(matches!(err, ToolError::Discovery(_)));
    }

    #[tokio::test]
    async fn test_every_tool_requires_store_hash() {
        let registry = ToolRegistry::discover(&test_config()).await.unwrap();
        for tool in registry.iter() {
            assert_eq!(tool.schema.required_parameters()[0], "store_Hash");
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let op = StaticOperation::new(OperationResult::success(serde_json::json!("ok")));
        let err = ToolRegistry::from_descriptors(vec![
            descriptor("same", op.clone()),
            descriptor("same", op),
        ])
        .unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(ref n) if n == "same"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.listings().is_empty());
        assert!(registry.get("get_all_products").is_none());
    }
}
