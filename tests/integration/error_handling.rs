//! Integration tests for error classification

use crate::integration::mock_server::MockServerFixture;
use std::sync::{Arc, Mutex};
use voicechat_client::interceptors::{Interceptor, RequestContext, ResponseContext};
use voicechat_client::{Error, HistoryType, VoiceChatClient};

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response(
            "GET",
            "/ai/history/chat",
            500,
            r#"{"timestamp":"2025-09-25T16:00:00","status":500,"error":"Internal Server Error"}"#,
        )
        .await;

    let err = fixture
        .client()
        .get_chat_history_list(&HistoryType::Chat)
        .await
        .unwrap_err();

    match &err {
        Error::Remote { status, message } => {
            assert_eq!(*status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().starts_with("Server error: 500"));
}

#[tokio::test]
async fn test_error_statuses_are_reported() {
    for status in [400usize, 404, 503] {
        let mut fixture = MockServerFixture::new().await;
        let _mock = fixture
            .mock_error_response("GET", "/chat-session/tts/models", status, "{}")
            .await;

        let err = fixture.client().get_tts_models().await.unwrap_err();
        assert_eq!(err.status(), Some(status as u16));
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_a_connect_error() {
    // Port 1 is reserved and nothing listens there.
    let client = VoiceChatClient::builder()
        .base_url("http://127.0.0.1:1")
        .timeout_secs(5)
        .build()
        .unwrap();

    let err = client.get_tts_models().await.unwrap_err();

    assert!(
        matches!(
            err,
            Error::Transport(voicechat_client::transport::TransportError::Connect(_))
        ),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_stalled_backend_is_a_timeout() {
    // Accepts connections and never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = VoiceChatClient::builder()
        .base_url(format!("http://{addr}"))
        .timeout_secs(1)
        .build()
        .unwrap();

    let err = client.get_tts_models().await.unwrap_err();

    assert!(err.is_timeout(), "unexpected error: {err:?}");
    assert!(matches!(
        err,
        Error::Transport(voicechat_client::transport::TransportError::Timeout(_))
    ));
}

#[tokio::test]
async fn test_non_json_body_is_returned_as_string() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("GET", "/chat-session/tts/models")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("maintenance")
        .create_async()
        .await;

    let data = fixture.client().get_tts_models().await.unwrap();
    assert_eq!(data, serde_json::Value::String("maintenance".into()));
}

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<(String, Option<u16>)>>,
}

#[async_trait::async_trait]
impl Interceptor for Recorder {
    async fn on_response(&self, ctx: &RequestContext, resp: &ResponseContext, _body: &serde_json::Value) {
        self.seen
            .lock()
            .unwrap()
            .push((ctx.operation.to_string(), Some(resp.status)));
    }

    async fn on_error(&self, ctx: &RequestContext, _err: &Error) {
        self.seen.lock().unwrap().push((ctx.operation.to_string(), None));
    }
}

#[tokio::test]
async fn test_interceptors_observe_requests() {
    let mut fixture = MockServerFixture::new().await;
    let _ok = fixture
        .mock_result(
            "GET",
            "/chat-session/tts/models",
            mockito::Matcher::Any,
            serde_json::json!([]),
        )
        .await;
    let _err = fixture
        .mock_error_response("GET", "/ai/history/voice/7-1", 500, "{}")
        .await;

    let recorder = Arc::new(Recorder::default());
    let client = fixture
        .builder()
        .without_default_logging()
        .shared_interceptor(recorder.clone())
        .build()
        .unwrap();

    client.get_tts_models().await.unwrap();
    client.get_voice_chat_history("7-1").await.unwrap_err();

    assert_eq!(
        *recorder.seen.lock().unwrap(),
        vec![
            ("get_tts_models".to_string(), Some(200)),
            ("get_voice_chat_history".to_string(), None),
        ]
    );
}
