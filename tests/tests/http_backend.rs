use application::chat_service::{ChatService, SendOutcome};
use domain::failure_policy::{
    ChatFailure, Liveness, NoticeKind, CREDENTIALS_MISSING_TEXT, GENERIC_TEXT,
};
use domain::state::ChatState;
use infrastructure::config::Config;
use infrastructure::http_backend::HttpChatBackend;
use tests::{closed_base_url, FixedConnectivity, StubBehaviour, StubChat, StubServer};

fn service_for(base_url: &str) -> ChatService<HttpChatBackend, FixedConnectivity> {
    let config = Config::default().with_base_url(Some(base_url));
    let backend = HttpChatBackend::new(&config).unwrap();
    ChatService::new(backend, FixedConnectivity(true))
}

#[tokio::test]
async fn reply_is_appended_and_session_adopted() {
    let server = StubServer::start(StubBehaviour::replying("**Zaid** adalah fa'il.", Some("abc123"))).await;
    let service = service_for(&server.base_url);
    let mut state = ChatState::new();

    let outcome = service.send(&mut state, "قام زيدٌ").await;

    assert!(matches!(outcome, SendOutcome::Replied(_)));
    assert_eq!(state.session_id.as_str(), "abc123");
    assert_eq!(state.transcript.last().unwrap().text, "**Zaid** adalah fa'il.");

    let bodies = server.chat_bodies();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["message"], "قام زيدٌ");
    assert_eq!(bodies[0]["sessionId"], "");
}

#[tokio::test]
async fn second_request_carries_the_session() {
    let server = StubServer::start(StubBehaviour::replying("ok", Some("abc123"))).await;
    let service = service_for(&server.base_url);
    let mut state = ChatState::new();

    service.send(&mut state, "q1").await;
    service.send(&mut state, "q2").await;

    let bodies = server.chat_bodies();
    assert_eq!(bodies[1]["sessionId"], "abc123");
    assert_eq!(state.transcript.len(), 5);
}

#[tokio::test]
async fn missing_api_key_short_circuits() {
    let server = StubServer::start(StubBehaviour {
        api_key_status: "missing",
        chat: StubChat::Garbage,
        ..StubBehaviour::replying("ok", None)
    })
    .await;
    let service = service_for(&server.base_url);
    let mut state = ChatState::new();

    assert_eq!(service.check_health().await, Liveness::CredentialsMissing);
    service.send(&mut state, "قام زيدٌ").await;

    assert!(server.chat_bodies().is_empty());
    assert_eq!(state.transcript.last().unwrap().text, CREDENTIALS_MISSING_TEXT);
    assert!(state.session_id.is_empty());
}

#[tokio::test]
async fn server_error_message_is_used() {
    let server = StubServer::start(StubBehaviour {
        api_key_status: "configured",
        chat: StubChat::Fail {
            status: 500,
            message: Some("Gagal menghubungi model.".into()),
        },
        ..StubBehaviour::replying("ok", None)
    })
    .await;
    let service = service_for(&server.base_url);
    let mut state = ChatState::new();

    match service.send(&mut state, "q").await {
        SendOutcome::Failed(notice) => {
            assert_eq!(notice.kind, NoticeKind::ServerMessage);
            assert_eq!(notice.text, "Gagal menghubungi model.");
        }
        other => panic!("unexpected outcome {:?}", other),
    }
}

#[tokio::test]
async fn error_status_without_message_is_generic() {
    let server = StubServer::start(StubBehaviour {
        api_key_status: "configured",
        chat: StubChat::Fail {
            status: 503,
            message: None,
        },
        ..StubBehaviour::replying("ok", None)
    })
    .await;
    let service = service_for(&server.base_url);
    let mut state = ChatState::new();

    service.send(&mut state, "q").await;

    assert_eq!(state.transcript.last().unwrap().text, GENERIC_TEXT);
}

#[tokio::test]
async fn undecodable_reply_is_generic() {
    let server = StubServer::start(StubBehaviour {
        api_key_status: "configured",
        chat: StubChat::Garbage,
        ..StubBehaviour::replying("ok", None)
    })
    .await;
    let service = service_for(&server.base_url);
    let mut state = ChatState::new();

    service.send(&mut state, "q").await;

    assert_eq!(state.transcript.last().unwrap().text, GENERIC_TEXT);
    assert!(!state.busy);
}

#[tokio::test]
async fn refused_connection_names_the_configured_backend() {
    let base_url = closed_base_url();
    let service = service_for(&base_url);
    let mut state = ChatState::new();

    match service.send(&mut state, "q").await {
        SendOutcome::Failed(notice) => {
            assert_eq!(notice.kind, NoticeKind::Unreachable);
            assert!(notice.text.ends_with(&base_url));
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(state.transcript.len(), 3);
    assert!(!state.busy);
}

#[tokio::test]
async fn failing_health_check_shows_its_message_and_skips_chat() {
    let server = StubServer::start(StubBehaviour::unhealthy(
        503,
        Some("Layanan sedang dalam pemeliharaan."),
    ))
    .await;
    let service = service_for(&server.base_url);
    let mut state = ChatState::new();

    match service.check_health().await {
        Liveness::Unreachable(ChatFailure::Server { status, .. }) => assert_eq!(status, 503),
        other => panic!("unexpected liveness {:?}", other),
    }

    match service.send(&mut state, "q").await {
        SendOutcome::Failed(notice) => {
            assert_eq!(notice.kind, NoticeKind::ServerMessage);
            assert_eq!(notice.text, "Layanan sedang dalam pemeliharaan.");
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(server.chat_bodies().is_empty());
    assert_eq!(state.transcript.len(), 3);
    assert!(!state.busy);
}

#[tokio::test]
async fn failing_health_check_without_message_is_generic() {
    let server = StubServer::start(StubBehaviour::unhealthy(500, None)).await;
    let service = service_for(&server.base_url);
    let mut state = ChatState::new();

    service.send(&mut state, "q").await;

    assert!(server.chat_bodies().is_empty());
    assert_eq!(state.transcript.last().unwrap().text, GENERIC_TEXT);
    assert!(!state.busy);
}
