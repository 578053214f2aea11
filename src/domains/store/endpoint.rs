//! Generic read-only store endpoint operation.

use reqwest::Url;
use std::sync::Arc;
use tracing::warn;

use super::client::StoreClient;
use super::query::{QueryFilter, build_query, render_path};
use crate::domains::tools::{OperationResult, ToolError, ToolOperation, ValidatedArguments};

/// `GET` on a path template with a fixed set of forwarded filters.
pub struct StoreEndpoint {
    client: Arc<StoreClient>,
    path: &'static str,
    filters: &'static [QueryFilter],
}

impl StoreEndpoint {
    pub fn new(
        client: Arc<StoreClient>,
        path: &'static str,
        filters: &'static [QueryFilter],
    ) -> Self {
        Self {
            client,
            path,
            filters,
        }
    }

    /// Path and query string this endpoint would request for `arguments`.
    pub fn request_target(&self, arguments: &ValidatedArguments) -> Result<String, ToolError> {
        let url = self.target(arguments)?;
        match url.query() {
            Some(query) => Ok(format!("{}?{}", url.path(), query)),
            None => Ok(url.path().to_string()),
        }
    }

    fn target(&self, arguments: &ValidatedArguments) -> Result<Url, ToolError> {
        let segments = render_path(self.path, arguments)?;
        let query = build_query(self.filters, arguments)?;
        self.client.url_for(&segments, &query)
    }
}

#[async_trait::async_trait]
impl ToolOperation for StoreEndpoint {
    async fn invoke(&self, arguments: &ValidatedArguments) -> Result<OperationResult, ToolError> {
        let url = match self.target(arguments) {
            Ok(url) => url,
            // Unusable argument values are the caller's problem, not a protocol fault.
            Err(e @ ToolError::InvalidArguments(_)) => {
                warn!("Rejected arguments for {}: {}", self.path, e);
                return Ok(OperationResult::failure(e.to_string()));
            }
            Err(e) => return Err(e),
        };
        Ok(self.client.get(url).await)
    }
}
