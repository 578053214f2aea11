//! HTTP transport implementation.
//!
//! Stateless JSON-RPC over POST: every request acquires its own
//! [`RequestScope`] and releases it when the handler finishes or the client
//! goes away. `/health` and `/info` stay reachable even with zero tools.

use axum::{
    Json, Router,
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

use super::jsonrpc::{self, JsonRpcResponse};
use super::{HttpConfig, TransportError, TransportResult, shutdown_signal};
use crate::core::McpServer;
use crate::core::security::{UNAUTHORIZED, validate_bearer};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Template every request scope is acquired from.
    server: McpServer,
    /// Number of live request scopes.
    active: Arc<AtomicUsize>,
}

impl AppState {
    /// Create state for the given server.
    pub fn new(server: McpServer) -> Self {
        Self {
            server,
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of requests currently holding a scope.
    pub fn active_requests(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// A protocol-server instance held for the duration of one request.
///
/// Released in `Drop`, so release happens exactly once whether the
/// response completes or the handler future is dropped on disconnect.
pub struct RequestScope {
    server: McpServer,
    active: Arc<AtomicUsize>,
}

impl RequestScope {
    /// Acquire a scope from shared state.
    pub fn acquire(state: &AppState) -> Self {
        let live = state.active.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Request scope acquired ({} active)", live);
        Self {
            server: state.server.clone(),
            active: state.active.clone(),
        }
    }

    /// The server instance bound to this scope.
    pub fn server(&self) -> &McpServer {
        &self.server
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        let live = self.active.fetch_sub(1, Ordering::SeqCst) - 1;
        debug!("Request scope released ({} active)", live);
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport until Ctrl-C.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let tool_count = server.tool_count();
        let auth_enabled = server.config().auth.bearer_token.is_some();

        let app = router(AppState::new(server), &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, {} tools, CORS {})",
            addr, tool_count, cors_status
        );
        info!(
            "  → JSON-RPC: POST {}{}",
            self.config.rpc_path,
            if auth_enabled { " (bearer auth)" } else { "" }
        );
        info!("  → Health:   GET /health");
        info!("  → Info:     GET /info");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        info!("HTTP transport finished");
        Ok(())
    }
}

/// Build the HTTP router.
pub fn router(state: AppState, config: &HttpConfig) -> Router {
    let rpc = Router::new()
        .route(&config.rpc_path, post(handle_rpc))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/info", get(server_info))
        .merge(rpc)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(middleware::from_fn(short_circuit_options)).layer(cors);
    }

    app
}

/// Answer any `OPTIONS` request with an empty 200.
async fn short_circuit_options(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

/// Reject protocol requests without the configured bearer token.
async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Err(e) = validate_bearer(request.headers(), &state.server.config().auth) {
        warn!("Rejected request: {}", e);
        let body = JsonRpcResponse::error(None, UNAUTHORIZED, format!("Unauthorized: {e}"));
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }
    next.run(request).await
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "server": state.server.name(),
        "version": state.server.version(),
        "store": state.server.config().store.store_hash,
        "capabilities": { "tools": state.server.tool_count() },
        "activeRequests": state.active_requests(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Server description endpoint.
async fn server_info(State(state): State<AppState>) -> impl IntoResponse {
    let tools: Vec<_> = state
        .server
        .list_tools()
        .into_iter()
        .map(|tool| tool.name)
        .collect();

    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "description": "MCP server exposing read-only BigCommerce store data",
        "capabilities": { "tools": tools },
        "store": state.server.config().store.store_hash,
        "supportedTransports": ["stdio", "sse", "streamable-http"]
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(state): State<AppState>, body: String) -> Response {
    let scope = RequestScope::acquire(&state);

    let request = match jsonrpc::parse_request(&body) {
        Ok(request) => request,
        Err(error) => {
            warn!("Unparseable request body");
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    tracing::Span::current().record("method", request.method.as_str());
    info!("Received JSON-RPC request: {}", request.method);

    match jsonrpc::process_request(scope.server(), request).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
