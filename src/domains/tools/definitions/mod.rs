//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each resource family (products, customers, orders) lives in its own file;
//! every tool is a `GET` against the store API built from `common`.

pub mod common;
pub mod customers;
pub mod orders;
pub mod products;

pub use customers::GetAllCustomersTool;
pub use orders::{GetAllOrdersTool, GetOrderByIdTool, GetOrderProductsTool};
pub use products::{GetAllProductsTool, GetProductByIdTool};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::core::config::{Config, StoreConfig};
    use crate::domains::store::{StoreClient, StoreEndpoint};
    use crate::domains::tools::{ArgumentBag, Dispatcher, ToolRegistry};

    fn bag(value: Value) -> ArgumentBag {
        value.as_object().cloned().unwrap_or_default()
    }

    fn store_config(base_url: &str) -> StoreConfig {
        StoreConfig {
            access_token: Some("token".to_string()),
            api_base_url: base_url.to_string(),
            ..StoreConfig::default()
        }
    }

    async fn dispatcher_for(server: &MockServer) -> Dispatcher {
        let mut config = Config::default();
        config.store = store_config(&server.uri());
        let registry = ToolRegistry::discover(&config).await.unwrap();
        Dispatcher::new(Arc::new(registry))
    }

    #[test]
    fn test_orders_query_only_contains_given_filter() {
        let client = Arc::new(StoreClient::new(&store_config("http://localhost")).unwrap());
        let endpoint =
            StoreEndpoint::new(client, GetAllOrdersTool::PATH, GetAllOrdersTool::FILTERS);
        let args = GetAllOrdersTool::schema()
            .validate(bag(json!({ "store_Hash": "abc", "customer_id": 3 })))
            .unwrap();
        assert_eq!(
            endpoint.request_target(&args).unwrap(),
            "/stores/abc/v2/orders?customer_id=3"
        );
    }

    #[test]
    fn test_every_filter_is_declared() {
        let families = [
            (GetAllProductsTool::schema(), GetAllProductsTool::FILTERS),
            (GetProductByIdTool::schema(), GetProductByIdTool::FILTERS),
            (GetAllCustomersTool::schema(), GetAllCustomersTool::FILTERS),
            (GetAllOrdersTool::schema(), GetAllOrdersTool::FILTERS),
            (GetOrderProductsTool::schema(), GetOrderProductsTool::FILTERS),
        ];
        for (schema, filters) in families {
            for filter in filters {
                assert!(
                    schema.parameters().iter().any(|p| p.name == filter.param),
                    "filter {} is not declared",
                    filter.param
                );
            }
        }
    }

    #[tokio::test]
    async fn test_round_trip_products() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stores/abc/v3/catalog/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[{"id":1}]}"#))
            .mount(&server)
            .await;

        let envelope = dispatcher_for(&server)
            .await
            .call_tool("get_all_products", bag(json!({ "store_Hash": "abc" })))
            .await
            .unwrap();

        let expected = format!(
            "Found 1 items:\n{}",
            serde_json::to_string_pretty(&json!({ "data": [{ "id": 1 }] })).unwrap()
        );
        assert_eq!(envelope.text(), expected);
        assert!(envelope.is_error.is_none());
        assert!(envelope.meta.unwrap().has_data);
    }

    #[tokio::test]
    async fn test_html_401_is_authentication_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stores/abc/v2/orders"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string("<html><title>401 Unauthorized</title></html>"),
            )
            .mount(&server)
            .await;

        let envelope = dispatcher_for(&server)
            .await
            .call_tool("get_all_orders", bag(json!({ "store_Hash": "abc" })))
            .await
            .unwrap();

        assert!(envelope.is_error());
        assert!(envelope.text().contains("Authentication failed"));
    }

    #[tokio::test]
    async fn test_empty_body_returns_sentinel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stores/abc/v2/orders/7/products"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let envelope = dispatcher_for(&server)
            .await
            .call_tool(
                "get_order_products",
                bag(json!({ "store_Hash": "abc", "order_id": 7 })),
            )
            .await
            .unwrap();

        assert!(!envelope.is_error());
        assert!(envelope.text().starts_with("Found 0 items:\n"));
        assert!(envelope.text().contains("\"total\": 0"));
    }

    /// Mounts a catch-all that fails verification if any request is sent.
    async fn expect_no_upstream_call(server: &MockServer) {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_bad_path_argument_is_business_failure() {
        let server = MockServer::start().await;
        expect_no_upstream_call(&server).await;

        let envelope = dispatcher_for(&server)
            .await
            .call_tool(
                "get_order_by_id",
                bag(json!({ "store_Hash": "abc", "order_id": { "id": 1 } })),
            )
            .await
            .unwrap();
        assert!(envelope.is_error());
        assert!(envelope.text().starts_with("Error: Invalid arguments: "));
    }

    #[tokio::test]
    async fn test_unusable_argument_values_are_business_failures() {
        let server = MockServer::start().await;
        expect_no_upstream_call(&server).await;
        let dispatcher = dispatcher_for(&server).await;

        for args in [
            json!({ "store_Hash": null }),
            json!({ "store_Hash": "" }),
            json!({ "store_Hash": "abc", "customer_id": { "a": 1 } }),
        ] {
            let envelope = dispatcher
                .call_tool("get_all_orders", bag(args.clone()))
                .await
                .unwrap();
            assert!(envelope.is_error(), "{args} should be rejected");
            assert!(envelope.text().starts_with("Error: Invalid arguments: "));
        }
    }

    #[tokio::test]
    async fn test_dot_segments_cannot_escape_path() {
        let server = MockServer::start().await;
        expect_no_upstream_call(&server).await;
        let dispatcher = dispatcher_for(&server).await;

        for order_id in ["..", "."] {
            let envelope = dispatcher
                .call_tool(
                    "get_order_products",
                    bag(json!({ "store_Hash": "abc", "order_id": order_id })),
                )
                .await
                .unwrap();
            assert!(envelope.is_error());
            assert!(envelope.text().starts_with("Error: Invalid arguments: "));
        }
    }

    #[tokio::test]
    async fn test_segment_values_are_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stores/abc/v2/orders/7%20x"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 7 })))
            .expect(1)
            .mount(&server)
            .await;

        let envelope = dispatcher_for(&server)
            .await
            .call_tool(
                "get_order_by_id",
                bag(json!({ "store_Hash": "abc", "order_id": "7 x" })),
            )
            .await
            .unwrap();
        assert!(!envelope.is_error());
    }
}
