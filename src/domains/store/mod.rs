//! Upstream store API.
//!
//! Everything that talks to the BigCommerce REST API lives here:
//! - `client` - authenticated HTTP client
//! - `response` - classification of upstream responses into operation results
//! - `query` - path templates and filter-to-query mapping
//! - `endpoint` - the generic `ToolOperation` used by every store tool

mod client;
mod endpoint;
pub mod query;
pub mod response;

pub use client::StoreClient;
pub use endpoint::StoreEndpoint;
pub use query::QueryFilter;
