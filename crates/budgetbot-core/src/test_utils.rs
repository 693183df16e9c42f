//! Test utilities for budgetbot-core
//!
//! Provides an in-process mock model server speaking the three HTTP dialects
//! the backends use (Gemini generateContent, OpenAI chat completions, Ollama
//! generate). Every request is recorded for later inspection.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Json, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// How the mock server answers
#[derive(Debug, Clone)]
pub struct MockBehavior {
    /// Text placed in the model reply
    pub reply: String,
    /// HTTP status; anything but 200 returns an error body instead of a reply
    pub status: u16,
    /// Wait before answering (to exercise client timeouts)
    pub delay: Option<Duration>,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            reply: "**Analysis**\n- Mock recommendation".to_string(),
            status: 200,
            delay: None,
        }
    }
}

/// A request captured by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    /// `x-goog-api-key` or `Authorization` header value, if present
    pub credential: Option<String>,
    pub body: Value,
}

struct MockState {
    behavior: MockBehavior,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock model server for testing and development
pub struct MockModelServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockModelServer {
    /// Start with default behavior on an available port
    pub async fn start() -> Self {
        Self::start_with(MockBehavior::default()).await
    }

    /// Start with custom behavior on an available port
    pub async fn start_with(behavior: MockBehavior) -> Self {
        let state = Arc::new(MockState {
            behavior,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1beta/models/:call", post(handle_gemini))
            .route("/v1/chat/completions", post(handle_openai))
            .route("/api/generate", post(handle_ollama))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockModelServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Record the request, apply the delay, and short-circuit on a failure status
async fn prepare(
    state: &MockState,
    path: String,
    headers: &HeaderMap,
    body: Value,
) -> Option<Response> {
    let credential = headers
        .get("x-goog-api-key")
        .or_else(|| headers.get("authorization"))
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    state.requests.lock().unwrap().push(RecordedRequest {
        path,
        credential,
        body,
    });

    if let Some(delay) = state.behavior.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(state.behavior.status).unwrap_or(StatusCode::OK);
    if status.is_success() {
        None
    } else {
        Some((status, Json(json!({"error": {"message": "mock failure"}}))).into_response())
    }
}

/// Gemini generateContent endpoint
async fn handle_gemini(
    State(state): State<Arc<MockState>>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let path = format!("/v1beta/models/{}", call);
    if let Some(failure) = prepare(&state, path, &headers, body).await {
        return failure;
    }

    Json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": state.behavior.reply}]},
            "finishReason": "STOP"
        }]
    }))
    .into_response()
}

/// OpenAI chat completions endpoint
async fn handle_openai(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let model = body["model"].clone();
    if let Some(failure) = prepare(&state, "/v1/chat/completions".into(), &headers, body).await {
        return failure;
    }

    Json(json!({
        "model": model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": state.behavior.reply},
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

/// Ollama generate endpoint
async fn handle_ollama(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let model = body["model"].clone();
    if let Some(failure) = prepare(&state, "/api/generate".into(), &headers, body).await {
        return failure;
    }

    Json(json!({
        "model": model,
        "response": state.behavior.reply,
        "done": true
    }))
    .into_response()
}
