use domain::backend::{ChatBackend, ChatReply, ChatRequest, Connectivity};
use domain::failure_policy::{ChatFailure, FailureNotice, Liveness};
use domain::models::Message;
use domain::state::{update, ChatEvent, ChatState, Effect};
use shared::telemetry::Telemetry;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Blank input or a send already in flight; nothing was appended.
    Ignored,
    Replied(Message),
    Failed(FailureNotice),
}

/// Turns one user message into one round trip against the backend and folds
/// the result back into the chat state. Failures never escape: each one
/// becomes exactly one assistant message.
pub struct ChatService<B, C> {
    backend: B,
    connectivity: C,
}

impl<B: ChatBackend, C: Connectivity> ChatService<B, C> {
    pub fn new(backend: B, connectivity: C) -> Self {
        Self {
            backend,
            connectivity,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn send(&self, state: &mut ChatState, text: &str) -> SendOutcome {
        let Some(request) = self.submit(state, text) else {
            return SendOutcome::Ignored;
        };
        let result = self.resolve(&request).await;
        self.settle(state, result)
    }

    /// Appends the user message and marks the state busy. `None` when the
    /// input is blank or another send is still pending.
    pub fn submit(&self, state: &mut ChatState, text: &str) -> Option<ChatRequest> {
        match update(state, ChatEvent::Submit(text.to_string())) {
            Some(Effect::Dispatch(request)) => Some(request),
            _ => None,
        }
    }

    /// Health probe, then the chat call. Touches no state so the caller can
    /// keep rendering while it is pending.
    pub async fn resolve(&self, request: &ChatRequest) -> Result<ChatReply, FailureNotice> {
        let telemetry = Telemetry::new();
        let result = self.dispatch(request).await;
        debug!(elapsed_ms = telemetry.elapsed_ms(), ok = result.is_ok(), "send finished");

        result.map_err(|failure| {
            let online = self.connectivity.is_online();
            warn!(error = %failure, online, "chat request failed");
            FailureNotice::classify(&failure, online, self.backend.base_url())
        })
    }

    pub fn settle(
        &self,
        state: &mut ChatState,
        result: Result<ChatReply, FailureNotice>,
    ) -> SendOutcome {
        let failure = result.as_ref().err().cloned();
        let before = state.transcript.len();
        update(state, ChatEvent::Settled(result));
        if state.transcript.len() == before {
            return SendOutcome::Ignored;
        }
        match (failure, state.transcript.last()) {
            (Some(notice), _) => SendOutcome::Failed(notice),
            (None, Some(message)) => SendOutcome::Replied(message.clone()),
            (None, None) => SendOutcome::Ignored,
        }
    }

    pub fn reset(&self, state: &mut ChatState) {
        info!("conversation reset");
        update(state, ChatEvent::Reset);
    }

    pub async fn check_health(&self) -> Liveness {
        self.backend.check_health().await
    }

    async fn dispatch(&self, request: &ChatRequest) -> Result<ChatReply, ChatFailure> {
        match self.backend.check_health().await {
            Liveness::Ready => {}
            Liveness::CredentialsMissing => return Err(ChatFailure::CredentialsMissing),
            Liveness::Unreachable(failure) => return Err(failure),
        }
        debug!(has_session = !request.session_id.is_empty(), "posting chat message");
        self.backend.chat(request).await
    }
}
