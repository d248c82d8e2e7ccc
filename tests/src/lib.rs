//! Test doubles shared by the integration tests: a scripted in-memory
//! backend, a fixed connectivity probe and a stub HTTP service.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use domain::backend::{ChatBackend, ChatReply, ChatRequest, Connectivity};
use domain::failure_policy::{ChatFailure, Liveness};
use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

pub const FAKE_BASE_URL: &str = "http://localhost:5000";

pub struct FakeBackend {
    liveness: Mutex<Liveness>,
    replies: Mutex<VecDeque<Result<ChatReply, ChatFailure>>>,
    requests: Mutex<Vec<ChatRequest>>,
    health_calls: AtomicUsize,
    chat_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn ready() -> Self {
        Self::with_liveness(Liveness::Ready)
    }

    pub fn with_liveness(liveness: Liveness) -> Self {
        Self {
            liveness: Mutex::new(liveness),
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            health_calls: AtomicUsize::new(0),
            chat_calls: AtomicUsize::new(0),
        }
    }

    pub fn reply(self, response: &str, session_id: Option<&str>) -> Self {
        self.push(Ok(ChatReply::new(response, session_id)))
    }

    pub fn fail(self, failure: ChatFailure) -> Self {
        self.push(Err(failure))
    }

    fn push(self, result: Result<ChatReply, ChatFailure>) -> Self {
        self.replies.lock().unwrap().push_back(result);
        self
    }

    pub fn set_liveness(&self, liveness: Liveness) {
        *self.liveness.lock().unwrap() = liveness;
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChatBackend for FakeBackend {
    async fn check_health(&self) -> Liveness {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        self.liveness.lock().unwrap().clone()
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ChatFailure> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatFailure::Decode("no scripted reply".into())))
    }

    fn base_url(&self) -> &str {
        FAKE_BASE_URL
    }
}

pub struct FixedConnectivity(pub bool);

impl Connectivity for FixedConnectivity {
    fn is_online(&self) -> bool {
        self.0
    }
}

/// What the stub service answers on `POST /api/chat`.
#[derive(Debug, Clone)]
pub enum StubChat {
    Reply {
        response: String,
        session_id: Option<String>,
    },
    Fail {
        status: u16,
        message: Option<String>,
    },
    Garbage,
}

#[derive(Debug, Clone)]
pub struct StubBehaviour {
    pub api_key_status: &'static str,
    pub chat: StubChat,
    /// Status of `GET /api/health`; anything but 2xx answers with
    /// `health_message` as the error body.
    pub health_status: u16,
    pub health_message: Option<String>,
}

impl StubBehaviour {
    pub fn replying(response: &str, session_id: Option<&str>) -> Self {
        Self {
            api_key_status: "configured",
            chat: StubChat::Reply {
                response: response.to_string(),
                session_id: session_id.map(str::to_string),
            },
            health_status: 200,
            health_message: None,
        }
    }

    pub fn unhealthy(status: u16, message: Option<&str>) -> Self {
        Self {
            health_status: status,
            health_message: message.map(str::to_string),
            ..Self::replying("tidak terpakai", None)
        }
    }
}

struct StubState {
    behaviour: StubBehaviour,
    chat_bodies: Mutex<Vec<Value>>,
}

/// Minimal stand-in for the grammar service, bound to an ephemeral port.
pub struct StubServer {
    pub base_url: String,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(behaviour: StubBehaviour) -> Self {
        let state = Arc::new(StubState {
            behaviour,
            chat_bodies: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .route("/api/health", get(health))
            .route("/api/chat", post(chat))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn chat_bodies(&self) -> Vec<Value> {
        self.state.chat_bodies.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn health(State(state): State<Arc<StubState>>) -> Response {
    let status = StatusCode::from_u16(state.behaviour.health_status).unwrap();
    if !status.is_success() {
        let body = json!({ "message": state.behaviour.health_message });
        return (status, Json(body)).into_response();
    }
    Json(json!({
        "status": "ok",
        "apiKeyStatus": state.behaviour.api_key_status,
    }))
    .into_response()
}

async fn chat(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> Response {
    state.chat_bodies.lock().unwrap().push(body);
    match &state.behaviour.chat {
        StubChat::Reply {
            response,
            session_id,
        } => {
            let mut reply = Map::new();
            reply.insert("response".into(), json!(response));
            if let Some(id) = session_id {
                reply.insert("sessionId".into(), json!(id));
            }
            Json(Value::Object(reply)).into_response()
        }
        StubChat::Fail { status, message } => {
            let status = StatusCode::from_u16(*status).unwrap();
            (status, Json(json!({ "message": message }))).into_response()
        }
        StubChat::Garbage => (StatusCode::OK, "<html>bukan json</html>").into_response(),
    }
}

/// A base URL whose port was just released, so connecting is refused.
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
