//! Customer tools.

use std::sync::Arc;

use super::common::{store_schema, store_tool, with_paging};
use crate::domains::store::{QueryFilter, StoreClient};
use crate::domains::tools::{ParameterKind, ParameterSchema, ToolDescriptor};

/// List customers with optional filters.
pub struct GetAllCustomersTool;

impl GetAllCustomersTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_all_customers";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List customers of the store. Supports filtering by id, email, name, company, customer group and creation date, plus paging and sorting.";

    pub const PATH: &'static str = "/stores/{store_Hash}/v3/customers";

    pub const FILTERS: &'static [QueryFilter] = &[
        QueryFilter::renamed("id", "id:in"),
        QueryFilter::renamed("email", "email:in"),
        QueryFilter::renamed("name", "name:in"),
        QueryFilter::renamed("name_like", "name:like"),
        QueryFilter::renamed("company", "company:in"),
        QueryFilter::renamed("customer_group_id", "customer_group_id:in"),
        QueryFilter::renamed("date_created_min", "date_created:min"),
        QueryFilter::renamed("date_created_max", "date_created:max"),
        QueryFilter::same("include"),
        QueryFilter::same("sort"),
        QueryFilter::same("page"),
        QueryFilter::same("limit"),
    ];

    pub fn schema() -> ParameterSchema {
        with_paging(
            store_schema()
                .optional("id", ParameterKind::String, "Comma-separated customer ids")
                .optional(
                    "email",
                    ParameterKind::String,
                    "Comma-separated email addresses",
                )
                .optional("name", ParameterKind::String, "Exact full name")
                .optional(
                    "name_like",
                    ParameterKind::String,
                    "Substring of the full name",
                )
                .optional("company", ParameterKind::String, "Company name")
                .optional(
                    "customer_group_id",
                    ParameterKind::Integer,
                    "Customer group id",
                )
                .optional(
                    "date_created_min",
                    ParameterKind::String,
                    "Created on or after this date (YYYY-MM-DD or RFC 3339)",
                )
                .optional(
                    "date_created_max",
                    ParameterKind::String,
                    "Created on or before this date (YYYY-MM-DD or RFC 3339)",
                )
                .optional(
                    "include",
                    ParameterKind::String,
                    "Sub-resources to embed, e.g. addresses,formfields",
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
