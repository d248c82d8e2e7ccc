use crate::backend::{ChatReply, ChatRequest};
use crate::failure_policy::FailureNotice;
use crate::models::Message;
use crate::scroll::{ScrollMetrics, ScrollTracker};
use crate::session::{SessionId, Transcript};
use shared::utils::is_blank;
use tracing::debug;

/// Everything the chat view owns. Created when the view opens and dropped
/// with it; nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub transcript: Transcript,
    pub session_id: SessionId,
    pub busy: bool,
    pub scroll: ScrollTracker,
}

#[derive(Debug, Clone)]
pub enum ChatEvent {
    Submit(String),
    Settled(Result<ChatReply, FailureNotice>),
    Reset,
    Scrolled(ScrollMetrics),
    RepositionElapsed(ScrollMetrics),
}

/// Work the caller must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch(ChatRequest),
    ScrollTo(u32),
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scroll_threshold(threshold: u32) -> Self {
        Self {
            scroll: ScrollTracker::with_threshold(threshold),
            ..Self::default()
        }
    }

    pub fn can_submit(&self, text: &str) -> bool {
        !self.busy && !is_blank(text)
    }
}

pub fn update(state: &mut ChatState, event: ChatEvent) -> Option<Effect> {
    match event {
        ChatEvent::Submit(text) => {
            if !state.can_submit(&text) {
                debug!(busy = state.busy, "submit ignored");
                return None;
            }
            let request = ChatRequest {
                message: text.clone(),
                session_id: state.session_id.as_str().to_string(),
            };
            state.transcript.append(Message::user(text));
            state.busy = true;
            state.scroll.request_reposition();
            Some(Effect::Dispatch(request))
        }
        ChatEvent::Settled(result) => {
            if !state.busy {
                debug!("late reply dropped");
                return None;
            }
            let reply = match result {
                Ok(reply) => {
                    if state.session_id.adopt(reply.session_id.as_deref()) {
                        debug!(session_id = state.session_id.as_str(), "session adopted");
                    }
                    Message::assistant(reply.response)
                }
                Err(notice) => Message::assistant(notice.text),
            };
            state.transcript.append(reply);
            state.busy = false;
            state.scroll.request_reposition();
            None
        }
        ChatEvent::Reset => {
            state.transcript.reset();
            state.session_id.clear();
            state.busy = false;
            state.scroll.reset();
            None
        }
        ChatEvent::Scrolled(metrics) => {
            state.scroll.on_scroll(metrics);
            None
        }
        ChatEvent::RepositionElapsed(metrics) => {
            state.scroll.apply_reposition(metrics).map(Effect::ScrollTo)
        }
    }
}
