use crate::models::{Message, MessageId, Sender};
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const GREETING: &str = "Selamat datang di AI Nahwu! Saya menggunakan pengetahuan yang terbatas pada Kitab \"Mukhtashor Jiddan Syarah\" oleh Syekh Ahmad Zaini Dahlan. Silakan kirimkan pertanyaan pertama Anda tentang tata bahasa Arab sesuai dengan isi kitab tersebut.\n\n*Catatan: Jawaban akan ditampilkan dalam format Markdown untuk kemudahan membaca.*";

/// Opaque server-side correlation token. Empty until the first reply that
/// carries one; after that it never changes until an explicit reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First non-empty value wins. Returns true when `candidate` was taken.
    pub fn adopt(&mut self, candidate: Option<&str>) -> bool {
        match candidate {
            Some(value) if self.0.is_empty() && !value.is_empty() => {
                self.0 = value.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Append-only message history. The only other mutation is `reset`.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![Self::greeting()],
        }
    }

    fn greeting() -> Message {
        Message {
            id: MessageId::greeting(),
            text: GREETING.to_string(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
        }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn reset(&mut self) {
        self.messages = vec![Self::greeting()];
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Only the greeting is present.
    pub fn is_initial(&self) -> bool {
        self.messages.len() == 1 && self.messages[0].sender == Sender::Assistant
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
