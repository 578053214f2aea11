//! Catalog product tools.

use std::sync::Arc;

use super::common::{store_schema, store_tool, with_paging};
use crate::domains::store::{QueryFilter, StoreClient};
use crate::domains::tools::{ParameterKind, ParameterSchema, ToolDescriptor};

/// List catalog products with optional filters.
pub struct GetAllProductsTool;

impl GetAllProductsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_all_products";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List products from the store catalog. Supports filtering by id, name, SKU, price, brand, category, visibility and keyword, plus paging and sorting.";

    pub const PATH: &'static str = "/stores/{store_Hash}/v3/catalog/products";

    pub const FILTERS: &'static [QueryFilter] = &[
        QueryFilter::same("id"),
        QueryFilter::same("name"),
        QueryFilter::same("sku"),
        QueryFilter::same("price"),
        QueryFilter::same("brand_id"),
        QueryFilter::renamed("categories", "categories:in"),
        QueryFilter::same("is_visible"),
        QueryFilter::same("is_featured"),
        QueryFilter::same("availability"),
        QueryFilter::same("keyword"),
        QueryFilter::same("include"),
        QueryFilter::same("sort"),
        QueryFilter::same("direction"),
        QueryFilter::same("page"),
        QueryFilter::same("limit"),
    ];

    pub fn schema() -> ParameterSchema {
        with_paging(
            store_schema()
                .optional("id", ParameterKind::Integer, "Filter by product id")
                .optional(
                    "name",
                    ParameterKind::String,
                    "Filter by exact product name",
                )
                .optional("sku", ParameterKind::String, "Filter by SKU")
                .optional("price", ParameterKind::Number, "Filter by price")
                .optional("brand_id", ParameterKind::Integer, "Filter by brand id")
                .optional(
                    "categories",
                    ParameterKind::String,
                    "Comma-separated category ids the product must belong to",
                )
                .optional(
                    "is_visible",
                    ParameterKind::String,
                    "Filter by visibility (true/false)",
                )
                .optional(
                    "is_featured",
                    ParameterKind::String,
                    "Filter by featured flag (true/false)",
                )
                .optional(
                    "availability",
                    ParameterKind::String,
                    "Filter by availability (available, disabled, preorder)",
                )
                .optional(
                    "keyword",
                    ParameterKind::String,
                    "Free-text search over name and SKU",
                )
                .optional(
                    "include",
                    ParameterKind::String,
                    "Sub-resources to embed, e.g. variants,images,custom_fields",
                )
                .optional(
                    "sort",
                    ParameterKind::String,
                    "Field to sort by (id, name, price, ...)",
                )
                .optional(
                    "direction",
                    ParameterKind::String,
                    "Sort direction (asc or desc)",
                ),
        )
    }

    pub fn descriptor(client: Arc<StoreClient>) -> ToolDescriptor {
        store_tool(
            Self::NAME,
            Self::DESCRIPTION,
            Self::schema(),
            client,
            Self::PATH,
            Self::FILTERS,
        )
    }
}

/// Fetch a single catalog product.
pub struct GetProductByIdTool;

impl GetProductByIdTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_product_by_id";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get a single product from the store catalog by its product id.";

    pub const PATH: &'static str = "/stores/{store_Hash}/v3/catalog/products/{product_id}";

    pub const FILTERS: &'static [QueryFilter] = &[QueryFilter::same("include")];

    pub fn schema() -> ParameterSchema {
        store_schema()
            .required("product_id", ParameterKind::Integer, "Id of the product")
            .optional(
                "include",
                ParameterKind::String,
                "Sub-resources to embed, e.g. variants,images,custom_fields",
            )
    }

    pub fn descriptor(client: Arc<StoreClient>) -> ToolDescriptor {
        store_tool(
            Self::NAME,
            Self::DESCRIPTION,
            Self::schema(),
            client,
            Self::PATH,
            Self::FILTERS,
        )
    }
}
