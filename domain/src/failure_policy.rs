use thiserror::Error;

pub const CREDENTIALS_MISSING_TEXT: &str =
    "Kunci API Gemini belum dikonfigurasi. Harap atur GEMINI_API_KEY di file .env backend.";
pub const OFFLINE_TEXT: &str = "Tidak dapat terhubung ke server. Periksa koneksi internet Anda.";
pub const UNREACHABLE_TEXT_PREFIX: &str =
    "Tidak dapat terhubung ke server backend. Pastikan server backend berjalan di";
pub const GENERIC_TEXT: &str =
    "Maaf, terjadi kesalahan dalam memproses permintaan Anda. Silakan coba lagi.";

/// Everything that can go wrong between submitting a question and receiving
/// the answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatFailure {
    #[error("backend reports that its API key is missing")]
    CredentialsMissing,
    #[error("backend responded with status {status}")]
    Server { status: u16, message: Option<String> },
    #[error("cannot reach {endpoint}: {detail}")]
    Unreachable { endpoint: String, detail: String },
    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: String },
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Outcome of the health probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Liveness {
    Ready,
    CredentialsMissing,
    Unreachable(ChatFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Configuration,
    ServerMessage,
    Offline,
    Unreachable,
    Generic,
}

/// User-facing explanation of a failed send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    pub kind: NoticeKind,
    pub text: String,
}

impl FailureNotice {
    /// Rules are checked in order; the first match wins.
    pub fn classify(failure: &ChatFailure, online: bool, base_url: &str) -> Self {
        if matches!(failure, ChatFailure::CredentialsMissing) {
            return Self::new(NoticeKind::Configuration, CREDENTIALS_MISSING_TEXT);
        }
        if let ChatFailure::Server {
            message: Some(message),
            ..
        } = failure
        {
            if !message.is_empty() {
                return Self::new(NoticeKind::ServerMessage, message.clone());
            }
        }
        if !online {
            return Self::new(NoticeKind::Offline, OFFLINE_TEXT);
        }
        if matches!(failure, ChatFailure::Unreachable { .. }) {
            return Self::new(
                NoticeKind::Unreachable,
                format!("{} {}", UNREACHABLE_TEXT_PREFIX, base_url),
            );
        }
        Self::new(NoticeKind::Generic, GENERIC_TEXT)
    }

    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
