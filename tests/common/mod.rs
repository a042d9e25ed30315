//! Shared test utilities for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use a2a_host::builders::AgentCardBuilder;
use a2a_host::client::{AgentEndpoint, SendMessageResponse, TaskSubscription};
use a2a_host::error::{A2AError, A2AResult};
use a2a_host::registry::AgentDirectory;
use a2a_host::types::*;
use async_trait::async_trait;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};

/// Route library logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Cards and events
// ============================================================================

/// Build an agent card for testing.
pub fn agent_card(name: &str, url: &str, streaming: bool) -> AgentCard {
    AgentCardBuilder::new(name, format!("{name} for testing"), "0.1.0")
        .with_jsonrpc_interface(url)
        .with_streaming(streaming)
        .with_skill("echo", "Echo", "Echoes back messages", vec!["test".to_string()])
        .build()
}

pub fn task(id: &str, context_id: &str, state: TaskState) -> Task {
    Task {
        id: id.to_string(),
        context_id: context_id.to_string(),
        kind: "task".to_string(),
        status: TaskStatus::new(state),
        artifacts: None,
        history: None,
        metadata: None,
    }
}

/// A task whose status carries an agent message.
pub fn task_with_text(id: &str, context_id: &str, state: TaskState, text: &str) -> Task {
    let mut task = task(id, context_id, state);
    task.status = task.status.with_message(Message::agent("agent-msg", text));
    task
}

pub fn status_event(
    task_id: &str,
    state: TaskState,
    text: Option<&str>,
    is_final: bool,
) -> StreamResponse {
    let mut status = TaskStatus::new(state);
    if let Some(text) = text {
        status = status.with_message(Message::agent("status-msg", text));
    }
    StreamResponse::StatusUpdate(TaskStatusUpdateEvent {
        task_id: task_id.to_string(),
        context_id: None,
        kind: "status-update".to_string(),
        status,
        r#final: is_final,
        metadata: None,
    })
}

pub fn artifact_event(task_id: &str, text: &str) -> StreamResponse {
    StreamResponse::ArtifactUpdate(TaskArtifactUpdateEvent {
        task_id: task_id.to_string(),
        context_id: None,
        kind: "artifact-update".to_string(),
        artifact: Artifact {
            artifact_id: "artifact-1".to_string(),
            name: Some("output".to_string()),
            description: None,
            parts: vec![Part::text(text)],
            metadata: None,
        },
        append: None,
        last_chunk: Some(true),
        metadata: None,
    })
}

// ============================================================================
// In-process endpoint
// ============================================================================

/// An endpoint that replays a fixed script and records what it was sent.
pub struct ScriptedEndpoint {
    reply: Mutex<Option<A2AResult<SendMessageResponse>>>,
    events: Mutex<Vec<A2AResult<StreamResponse>>>,
    open_error: Mutex<Option<A2AError>>,
    sent: Mutex<Vec<SendMessageParams>>,
}

impl ScriptedEndpoint {
    pub fn new() -> Self {
        Self {
            reply: Mutex::new(None),
            events: Mutex::new(Vec::new()),
            open_error: Mutex::new(None),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Reply to `send_task` with `reply`.
    pub fn replying(self, reply: SendMessageResponse) -> Self {
        *self.reply.lock() = Some(Ok(reply));
        self
    }

    /// Fail `send_task` with `error`.
    pub fn failing(self, error: A2AError) -> Self {
        *self.reply.lock() = Some(Err(error.clone()));
        *self.open_error.lock() = Some(error);
        self
    }

    /// Stream `events` from `send_task_streaming`.
    pub fn streaming(self, events: Vec<A2AResult<StreamResponse>>) -> Self {
        *self.events.lock() = events;
        self
    }

    /// Every request this endpoint received, in order.
    pub fn sent(&self) -> Vec<SendMessageParams> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl AgentEndpoint for ScriptedEndpoint {
    async fn send_task(&self, params: SendMessageParams) -> A2AResult<SendMessageResponse> {
        self.sent.lock().push(params);
        self.reply
            .lock()
            .clone()
            .unwrap_or_else(|| Err(A2AError::Other("no reply scripted".to_string())))
    }

    async fn send_task_streaming(
        &self,
        params: SendMessageParams,
    ) -> A2AResult<TaskSubscription> {
        self.sent.lock().push(params);
        let open_error = self.open_error.lock().clone();
        if let Some(error) = open_error {
            return Err(error);
        }
        let events = self.events.lock().clone();
        Ok(TaskSubscription::from_events(events))
    }
}

/// A directory that serves fixed cards and endpoints keyed by address.
#[derive(Default)]
pub struct MockDirectory {
    cards: Mutex<HashMap<String, AgentCard>>,
    endpoints: Mutex<HashMap<String, Arc<dyn AgentEndpoint>>>,
    stalled: Mutex<Vec<String>>,
    resolved: Mutex<Vec<String>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `card` and `endpoint` at `address`.
    pub fn with_agent(
        self,
        address: &str,
        card: AgentCard,
        endpoint: Arc<dyn AgentEndpoint>,
    ) -> Self {
        self.cards.lock().insert(address.to_string(), card);
        self.endpoints.lock().insert(address.to_string(), endpoint);
        self
    }

    /// Never answer `resolve` for `address`.
    pub fn with_stalled(self, address: &str) -> Self {
        self.stalled.lock().push(address.to_string());
        self
    }

    /// Addresses `resolve` was called with.
    pub fn resolved(&self) -> Vec<String> {
        self.resolved.lock().clone()
    }
}

#[async_trait]
impl AgentDirectory for MockDirectory {
    async fn resolve(&self, address: &str) -> A2AResult<AgentCard> {
        self.resolved.lock().push(address.to_string());
        let stalled = self.stalled.lock().iter().any(|a| a == address);
        if stalled {
            futures::future::pending::<()>().await;
        }
        self.cards
            .lock()
            .get(address)
            .cloned()
            .ok_or_else(|| A2AError::Transport(format!("connection refused: {address}")))
    }

    fn connect(&self, _card: &AgentCard, address: &str) -> A2AResult<Arc<dyn AgentEndpoint>> {
        self.endpoints
            .lock()
            .get(address)
            .cloned()
            .ok_or_else(|| A2AError::Other(format!("no endpoint at {address}")))
    }
}

// ============================================================================
// HTTP mock agent
// ============================================================================

/// What a mock agent answers over HTTP.
#[derive(Clone)]
pub struct MockAgent {
    /// Card to publish. `None` makes every card path return 404.
    pub card: Option<Value>,
    /// Serve the card only at the legacy `/.well-known/agent.json` path.
    pub legacy_card_path: bool,
    /// Result of `message/send`.
    pub send_result: Value,
    /// `data:` payloads of the `message/stream` response, wrapped as
    /// JSON-RPC results.
    pub stream_events: Vec<Value>,
}

#[derive(Clone)]
struct MockState {
    agent: MockAgent,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// Handle to a running mock agent.
pub struct MockServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<Value>>>,
    pub handle: tokio::task::JoinHandle<()>,
}

impl MockServer {
    /// JSON-RPC request bodies received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn card_handler(State(state): State<MockState>) -> Response {
    match (&state.agent.card, state.agent.legacy_card_path) {
        (Some(card), false) => Json(card.clone()).into_response(),
        _ => axum::http::StatusCode::NOT_FOUND.into_response(),
    }
}

async fn legacy_card_handler(State(state): State<MockState>) -> Response {
    match (&state.agent.card, state.agent.legacy_card_path) {
        (Some(card), true) => Json(card.clone()).into_response(),
        _ => axum::http::StatusCode::NOT_FOUND.into_response(),
    }
}

async fn rpc_handler(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.requests.lock().push(body.clone());
    let id = body.get("id").cloned().unwrap_or(Value::Null);

    match body.get("method").and_then(Value::as_str) {
        Some("message/send") => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": state.agent.send_result,
        }))
        .into_response(),
        Some("message/stream") => {
            let mut sse = String::from(": connected\n\n");
            for event in &state.agent.stream_events {
                let wrapped = json!({"jsonrpc": "2.0", "id": id, "result": event});
                sse.push_str(&format!("data: {wrapped}\n\n"));
            }
            ([(header::CONTENT_TYPE, "text/event-stream")], sse).into_response()
        }
        _ => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": -32601, "message": "Method not found"},
        }))
        .into_response(),
    }
}

/// Start a mock agent on a random port.
pub async fn start_mock_agent(agent: MockAgent) -> MockServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    serve(listener, agent).await
}

/// Start a mock agent whose card points its JSON-RPC interface back at
/// `{base_url}/a2a`.
pub async fn start_mock_agent_with_card(
    name: &str,
    streaming: bool,
    mut agent: MockAgent,
) -> MockServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let card = agent_card(name, &format!("{base_url}/a2a"), streaming);
    agent.card = Some(serde_json::to_value(card).unwrap());
    serve(listener, agent).await
}

async fn serve(listener: tokio::net::TcpListener, agent: MockAgent) -> MockServer {
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        agent,
        requests: requests.clone(),
    };
    let app = Router::new()
        .route("/.well-known/agent-card.json", get(card_handler))
        .route("/.well-known/agent.json", get(legacy_card_handler))
        .route("/a2a", post(rpc_handler))
        .with_state(state);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Brief wait for the server to start accepting connections.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    MockServer {
        base_url,
        requests,
        handle,
    }
}

impl Default for MockAgent {
    fn default() -> Self {
        Self {
            card: None,
            legacy_card_path: false,
            send_result: json!({}),
            stream_events: Vec::new(),
        }
    }
}
