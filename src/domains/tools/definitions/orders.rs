//! Order tools.

use std::sync::Arc;

use super::common::{store_schema, store_tool, with_paging};
use crate::domains::store::{QueryFilter, StoreClient};
use crate::domains::tools::{ParameterKind, ParameterSchema, ToolDescriptor};

/// List orders with optional filters.
pub struct GetAllOrdersTool;

impl GetAllOrdersTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_all_orders";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List orders of the store. Supports filtering by customer, email, status, id range, total range and date range, plus paging and sorting.";

    pub const PATH: &'static str = "/stores/{store_Hash}/v2/orders";

    pub const FILTERS: &'static [QueryFilter] = &[
        QueryFilter::same("customer_id"),
        QueryFilter::same("email"),
        QueryFilter::same("status_id"),
        QueryFilter::same("min_id"),
        QueryFilter::same("max_id"),
        QueryFilter::same("min_total"),
        QueryFilter::same("max_total"),
        QueryFilter::same("min_date_created"),
        QueryFilter::same("max_date_created"),
        QueryFilter::same("min_date_modified"),
        QueryFilter::same("max_date_modified"),
        QueryFilter::same("payment_method"),
        QueryFilter::same("channel_id"),
        QueryFilter::same("is_deleted"),
        QueryFilter::same("sort"),
        QueryFilter::same("page"),
        QueryFilter::same("limit"),
    ];

    pub fn schema() -> ParameterSchema {
        with_paging(
            store_schema()
                .optional(
                    "customer_id",
                    ParameterKind::Integer,
                    "Only orders of this customer",
                )
                .optional(
                    "email",
                    ParameterKind::String,
                    "Only orders with this billing email",
                )
                .optional(
                    "status_id",
                    ParameterKind::Integer,
                    "Only orders in this status",
                )
                .optional("min_id", ParameterKind::Integer, "Lowest order id")
                .optional("max_id", ParameterKind::Integer, "Highest order id")
                .optional("min_total", ParameterKind::Number, "Lowest order total")
                .optional("max_total", ParameterKind::Number, "Highest order total")
                .optional(
                    "min_date_created",
                    ParameterKind::String,
                    "Created on or after this date (RFC 2822 or ISO 8601)",
                )
                .optional(
                    "max_date_created",
                    ParameterKind::String,
                    "Created on or before this date (RFC 2822 or ISO 8601)",
                )
                .optional(
                    "min_date_modified",
                    ParameterKind::String,
                    "Modified on or after this date (RFC 2822 or ISO 8601)",
                )
                .optional(
                    "max_date_modified",
                    ParameterKind::String,
                    "Modified on or before this date (RFC 2822 or ISO 8601)",
                )
                .optional(
                    "payment_method",
                    ParameterKind::String,
                    "Payment method name",
                )
                .optional("channel_id", ParameterKind::Integer, "Sales channel id")
                .optional(
                    "is_deleted",
                    ParameterKind::Boolean,
                    "Only archived orders when true",
                )
                .optional(
                    "sort",
                    ParameterKind::String,
                    "Sort order, e.g. date_created:desc",
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

/// Fetch a single order.
pub struct GetOrderByIdTool;

impl GetOrderByIdTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_order_by_id";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get a single order of the store by its order id.";

    pub const PATH: &'static str = "/stores/{store_Hash}/v2/orders/{order_id}";

    pub fn schema() -> ParameterSchema {
        store_schema().required("order_id", ParameterKind::Integer, "Id of the order")
    }

    pub fn descriptor(client: Arc<StoreClient>) -> ToolDescriptor {
        store_tool(Self::NAME, Self::DESCRIPTION, Self::schema(), client, Self::PATH, &[])
    }
}

/// List the line items of an order.
pub struct GetOrderProductsTool;

impl GetOrderProductsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_order_products";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List the products (line items) of an order.";

    pub const PATH: &'static str = "/stores/{store_Hash}/v2/orders/{order_id}/products";

    pub const FILTERS: &'static [QueryFilter] =
        &[QueryFilter::same("page"), QueryFilter::same("limit")];

    pub fn schema() -> ParameterSchema {
        with_paging(store_schema().required("order_id", ParameterKind::Integer, "Id of the order"))
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
