use crate::config::Config;
use anyhow::Context;
use domain::backend::{ChatBackend, ChatReply, ChatRequest};
use domain::failure_policy::{ChatFailure, Liveness};
use reqwest::{Client, Response};
use serde::Deserialize;
use shared::types::Result;
use std::sync::Arc;
use tracing::{debug, warn};

const API_KEY_MISSING: &str = "missing";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    #[serde(default)]
    api_key_status: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct HttpChatBackend {
    client: Arc<Client>,
    base_url: String,
}

impl HttpChatBackend {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(Self {
            client: Arc::new(client),
            base_url: config.api_base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch_health(&self) -> std::result::Result<Liveness, ChatFailure> {
        let url = self.endpoint("/api/health");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| transport_failure(&url, err))?;
        if !response.status().is_success() {
            return Err(server_failure(response).await);
        }
        let body = response
            .text()
            .await
            .map_err(|err| transport_failure(&url, err))?;
        // A body without a readable status does not block the chat call.
        let status = match serde_json::from_str::<HealthResponse>(&body) {
            Ok(health) => health.api_key_status,
            Err(err) => {
                debug!(error = %err, "health body not understood");
                None
            }
        };
        if status.as_deref() == Some(API_KEY_MISSING) {
            return Ok(Liveness::CredentialsMissing);
        }
        Ok(Liveness::Ready)
    }
}

impl ChatBackend for HttpChatBackend {
    async fn check_health(&self) -> Liveness {
        match self.fetch_health().await {
            Ok(liveness) => liveness,
            Err(failure) => {
                warn!(error = %failure, "health check failed");
                Liveness::Unreachable(failure)
            }
        }
    }

    async fn chat(&self, request: &ChatRequest) -> std::result::Result<ChatReply, ChatFailure> {
        let url = self.endpoint("/api/chat");
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| transport_failure(&url, err))?;
        if !response.status().is_success() {
            return Err(server_failure(response).await);
        }
        let text = response
            .text()
            .await
            .map_err(|err| transport_failure(&url, err))?;
        serde_json::from_str::<ChatReply>(&text).map_err(|err| ChatFailure::Decode(err.to_string()))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

async fn server_failure(response: Response) -> ChatFailure {
    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .and_then(|body| body.message);
    ChatFailure::Server { status, message }
}

/// Requests that never produced a response count as unreachable, except
/// timeouts, which stay distinct.
fn transport_failure(url: &str, err: reqwest::Error) -> ChatFailure {
    if err.is_timeout() {
        return ChatFailure::Timeout {
            endpoint: url.to_string(),
        };
    }
    if err.is_decode() || err.is_body() {
        return ChatFailure::Decode(err.to_string());
    }
    ChatFailure::Unreachable {
        endpoint: url.to_string(),
        detail: err.to_string(),
    }
}
