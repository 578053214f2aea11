//! Authenticated HTTP client for the store API.

use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

use super::query::encode_query;
use super::response::classify;
use crate::core::config::StoreConfig;
use crate::domains::tools::{OperationResult, ToolError};

const AUTH_HEADER: &str = "x-auth-token";

/// Thin wrapper over `reqwest::Client` with the store credential baked in.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StoreClient {
    /// Build a client from configuration.
    ///
    /// Fails when no access token is configured.
    pub fn new(config: &StoreConfig) -> Result<Self, ToolError> {
        let token = config
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ToolError::discovery("BIGCOMMERCE_ACCESS_TOKEN is not configured"))?;

        let mut auth = HeaderValue::from_str(token.trim())
            .map_err(|e| ToolError::discovery(format!("Invalid access token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ToolError::discovery(format!("Failed to build HTTP client: {e}")))?;

        let base_url = Url::parse(config.api_base_url.trim())
            .map_err(|e| ToolError::discovery(format!("Invalid API base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ToolError::discovery(format!(
                "Invalid API base URL: {}",
                config.api_base_url
            )));
        }

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `segments` to the base URL path and attach `query`.
    ///
    /// Each segment is percent-encoded on its own, so reserved characters in
    /// argument values cannot change the path structure.
    pub fn url_for(
        &self,
        segments: &[String],
        query: &[(String, String)],
    ) -> Result<Url, ToolError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ToolError::internal("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.set_query(Some(&encode_query(query)?));
        }
        Ok(url)
    }

    /// `GET url`, classified into an operation result.
    ///
    /// Transport failures are reported as `Failure`.
    pub async fn get(&self, url: Url) -> OperationResult {
        debug!("GET {}", url);

        let path = url.path().to_string();
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request to {} failed: {}", path, e);
                return OperationResult::failure(format!("Request failed: {e}"));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return OperationResult::failure(format!("Failed to read response body: {e}"));
            }
        };

        debug!("{} -> {}", path, status);
        classify(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> StoreConfig {
        StoreConfig {
            access_token: Some("secret-token".to_string()),
            api_base_url: base_url.to_string(),
            ..StoreConfig::default()
        }
    }

    #[test]
    fn test_requires_access_token() {
        let err = StoreClient::new(&StoreConfig::default()).unwrap_err();
        assert!(matches!(err, ToolError::Discovery(_)));

        let blank = StoreConfig {
            access_token: Some("  ".to_string()),
            ..StoreConfig::default()
        };
        assert!(StoreClient::new(&blank).is_err());
    }

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let err = StoreClient::new(&config("not a url")).unwrap_err();
        assert!(matches!(err, ToolError::Discovery(_)));
    }

    #[test]
    fn test_url_for_with_and_without_trailing_slash() {
        for base in ["https://api.example.com", "https://api.example.com/"] {
            let client = StoreClient::new(&config(base)).unwrap();
            let url = client
                .url_for(&segments(&["stores", "abc", "v2", "orders"]), &[])
                .unwrap();
            assert_eq!(url.as_str(), "https://api.example.com/stores/abc/v2/orders");
        }
    }

    #[test]
    fn test_url_for_keeps_base_path_prefix() {
        let client = StoreClient::new(&config("https://proxy.example.com/bc/")).unwrap();
        let url = client.url_for(&segments(&["stores", "abc"]), &[]).unwrap();
        assert_eq!(url.path(), "/bc/stores/abc");
    }

    #[test]
    fn test_url_for_percent_encodes_segments() {
        let client = StoreClient::new(&config("https://api.example.com")).unwrap();
        let url = client
            .url_for(
                &segments(&["stores", "a b%2F"]),
                &[("name".to_string(), "x&y".to_string())],
            )
            .unwrap();
        assert_eq!(url.path(), "/stores/a%20b%252F");
        assert_eq!(url.query(), Some("name=x%26y"));
    }

    #[tokio::test]
    async fn test_get_sends_token_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stores/abc/v2/orders"))
            .and(header("x-auth-token", "secret-token"))
            .and(query_param("customer_id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
            .expect(1)
            .mount(&server)
            .await;

        let client = StoreClient::new(&config(&server.uri())).unwrap();
        let url = client
            .url_for(
                &segments(&["stores", "abc", "v2", "orders"]),
                &[("customer_id".to_string(), "3".to_string())],
            )
            .unwrap();
        let result = client.get(url).await;
        assert_eq!(result, OperationResult::success(json!([{ "id": 1 }])));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_failure() {
        // Nothing listens on port 9 on loopback.
        let client = StoreClient::new(&config("http://127.0.0.1:9")).unwrap();
        let url = client.url_for(&segments(&["stores", "abc"]), &[]).unwrap();
        let result = client.get(url).await;
        match result {
            OperationResult::Failure(msg) => assert!(msg.starts_with("Request failed")),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
