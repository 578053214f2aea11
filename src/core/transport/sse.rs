//! SSE transport implementation.
//!
//! `GET /sse` opens a long-lived event stream and allocates a session. The
//! first event (`endpoint`) tells the client where to post its messages;
//! every JSON-RPC response for that session is then pushed back as a
//! `message` event. `POST /messages?sessionId=<id>` delivers one message to
//! the matching live session.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::{Stream, StreamExt, stream};
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::jsonrpc::{self, JsonRpcResponse};
use super::{HttpConfig, TransportError, TransportResult, shutdown_signal};
use crate::core::McpServer;

/// Path that opens the event stream.
pub const SSE_PATH: &str = "/sse";

/// Path that accepts session messages.
pub const MESSAGES_PATH: &str = "/messages";

/// Responses buffered per session before senders wait.
const SESSION_BUFFER: usize = 32;

/// One live event-stream connection.
#[derive(Clone)]
pub struct SseSession {
    /// Protocol-server instance bound to this connection.
    server: McpServer,
    /// Outbound side of the event stream.
    sender: mpsc::Sender<JsonRpcResponse>,
}

impl SseSession {
    /// Whether the event stream behind this session has gone away.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Live sessions keyed by session id.
///
/// Handlers run on a multi-threaded runtime, so the map is mutex-guarded.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SseSession>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SseSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Allocate a session for `server`, returning its id and the receiving
    /// end of its event stream.
    pub fn create(&self, server: McpServer) -> (String, mpsc::Receiver<JsonRpcResponse>) {
        let id = Uuid::new_v4().to_string();
        let (sender, receiver) = mpsc::channel(SESSION_BUFFER);
        self.lock().insert(id.clone(), SseSession { server, sender });
        (id, receiver)
    }

    /// Look up a live session.
    pub fn get(&self, id: &str) -> Option<SseSession> {
        self.lock().get(id).cloned()
    }

    /// Remove a session. Returns whether it was present.
    pub fn remove(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no session is live.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every session, which ends all open event streams.
    pub fn close_all(&self) {
        self.lock().clear();
    }
}

/// Removes its session from the store when the event stream is dropped.
struct SessionGuard {
    store: Arc<SessionStore>,
    id: String,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.store.remove(&self.id) {
            info!(session = %self.id, "SSE session closed");
        }
    }
}

/// Application state shared across SSE handlers.
#[derive(Clone)]
pub struct SseState {
    server: McpServer,
    sessions: Arc<SessionStore>,
}

impl SseState {
    /// Create state with an injected session store.
    pub fn new(server: McpServer, sessions: Arc<SessionStore>) -> Self {
        Self { server, sessions }
    }
}

/// SSE transport handler.
pub struct SseTransport {
    config: HttpConfig,
}

impl SseTransport {
    /// Create a new SSE transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Run the SSE transport until Ctrl-C.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.address();
        let sessions = Arc::new(SessionStore::new());
        let tool_count = server.tool_count();

        let mut app = router(SseState::new(server, sessions.clone()));
        if self.config.enable_cors {
            app = app.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (SSE, {} tools)", addr, tool_count);
        info!("  → Stream:   GET {}", SSE_PATH);
        info!("  → Messages: POST {}?sessionId=<id>", MESSAGES_PATH);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                // Open streams would otherwise keep graceful shutdown waiting.
                sessions.close_all();
            })
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        info!("SSE transport finished");
        Ok(())
    }
}

/// Build the SSE router.
pub fn router(state: SseState) -> Router {
    Router::new()
        .route(SSE_PATH, get(handle_sse))
        .route(MESSAGES_PATH, post(handle_message))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Open an event stream and allocate its session.
#[instrument(skip_all)]
async fn handle_sse(
    State(state): State<SseState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (id, receiver) = state.sessions.create(state.server.clone());
    info!(session = %id, "SSE session opened");

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("{MESSAGES_PATH}?sessionId={id}"));

    let guard = SessionGuard {
        store: state.sessions.clone(),
        id,
    };

    let messages = ReceiverStream::new(receiver).map(move |response| {
        let _session = &guard;
        Ok::<_, Infallible>(message_event(&response))
    });

    let events = stream::once(async move { Ok::<_, Infallible>(endpoint) }).chain(messages);

    Sse::new(events).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

/// Encode a response as a `message` event.
fn message_event(response: &JsonRpcResponse) -> Event {
    match Event::default().event("message").json_data(response) {
        Ok(event) => event,
        Err(e) => {
            warn!("Failed to encode SSE message: {}", e);
            Event::default().comment("encoding failed")
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

fn bad_request(msg: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, msg.into()).into_response()
}

/// Deliver one message to a live session.
#[instrument(skip_all, fields(session))]
async fn handle_message(
    State(state): State<SseState>,
    Query(query): Query<MessageQuery>,
    body: String,
) -> Response {
    let Some(id) = query.session_id else {
        return bad_request("Missing sessionId parameter");
    };
    tracing::Span::current().record("session", id.as_str());

    let Some(session) = state.sessions.get(&id) else {
        warn!("Message for unknown session");
        return bad_request(format!("No transport found for sessionId {id}"));
    };

    if session.is_closed() {
        state.sessions.remove(&id);
        return bad_request(format!("Session {id} is closed"));
    }

    let response = match jsonrpc::parse_request(&body) {
        Ok(request) => {
            info!("Received JSON-RPC request: {}", request.method);
            jsonrpc::process_request(&session.server, request).await
        }
        Err(error) => Some(error),
    };

    if let Some(response) = response {
        if session.sender.send(response).await.is_err() {
            state.sessions.remove(&id);
            return bad_request(format!("Session {id} is closed"));
        }
    }

    (StatusCode::ACCEPTED, "Accepted").into_response()
}

/// Health check endpoint.
async fn health_check(State(state): State<SseState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "server": state.server.name(),
        "version": state.server.version(),
        "transport": "sse",
        "activeSessions": state.sessions.len(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
