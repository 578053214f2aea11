//! Shared building blocks for store tool definitions.

use std::sync::Arc;

use crate::domains::store::{QueryFilter, StoreClient, StoreEndpoint};
use crate::domains::tools::{ParameterKind, ParameterSchema, ToolDescriptor};

/// Name of the store identifier parameter every tool requires.
pub const STORE_HASH: &str = "store_Hash";

/// Schema with the required store hash already declared.
pub fn store_schema() -> ParameterSchema {
    ParameterSchema::new().required(
        STORE_HASH,
        ParameterKind::String,
        "Store hash identifying the BigCommerce store (the segment after /stores/ in the API path)",
    )
}

/// Add the `page`/`limit` pair accepted by every list endpoint.
pub fn with_paging(schema: ParameterSchema) -> ParameterSchema {
    schema
        .optional(
            "page",
            ParameterKind::Integer,
            "Page number to return (starts at 1)",
        )
        .optional(
            "limit",
            ParameterKind::Integer,
            "Number of results per page",
        )
}

/// Wrap a store endpoint in a descriptor.
pub fn store_tool(
    name: &str,
    description: &str,
    schema: ParameterSchema,
    client: Arc<StoreClient>,
    path: &'static str,
    filters: &'static [QueryFilter],
) -> ToolDescriptor {
    ToolDescriptor::new(
        name,
        description,
        schema,
        Arc::new(StoreEndpoint::new(client, path, filters)),
    )
}
