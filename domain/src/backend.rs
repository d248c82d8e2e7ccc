use crate::failure_policy::{ChatFailure, Liveness};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

/// Successful body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ChatReply {
    pub fn new(response: impl Into<String>, session_id: Option<&str>) -> Self {
        Self {
            response: response.into(),
            session_id: session_id.map(str::to_string),
        }
    }
}

/// The remote grammar service.
pub trait ChatBackend {
    /// Liveness and configuration probe issued before every chat call.
    fn check_health(&self) -> impl Future<Output = Liveness> + Send;

    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, ChatFailure>> + Send;

    /// Base URL shown to the user when the service cannot be reached.
    fn base_url(&self) -> &str;
}

/// Whether the host currently has network connectivity at all.
pub trait Connectivity {
    fn is_online(&self) -> bool;
}
