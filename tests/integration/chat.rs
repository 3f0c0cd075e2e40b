//! Text and voice chat

use crate::integration::mock_server::{query, MockServerFixture};
use mockito::Matcher;
use serde_json::json;
use voicechat_client::{Error, FileUpload};

fn voice_reply_body() -> String {
    json!({
        "code": 1,
        "msg": "success",
        "data": {
            "agentVoice": "https://oss.example.com/tts/reply.mp3",
            "userVoice": "https://oss.example.com/asr/question.wav",
            "timestamp": 1727251200123i64
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_send_message_with_attachments() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/ai/chat")
        .match_query(query(&[("prompt", "你好"), ("chatId", "3-1727251200000")]))
        .match_header("content-type", Matcher::Regex("^multipart/form-data".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="files"; filename="notes.txt""#.into()),
            Matcher::Regex(r#"name="files"; filename="photo.png""#.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":1,"msg":"success","data":"收到"}"#)
        .create_async()
        .await;

    let files = vec![
        FileUpload::new(b"meeting at 3".to_vec(), "notes.txt"),
        FileUpload::new(b"PNG".to_vec(), "photo.png"),
    ];
    let data = fixture
        .client()
        .send_message("你好", "3-1727251200000", &files)
        .await
        .unwrap();

    assert_eq!(data, json!("收到"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_send_message_requires_chat_id() {
    let fixture = MockServerFixture::new().await;
    let err = fixture
        .client()
        .send_message("hi", "  ", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[tokio::test]
async fn test_send_voice_message() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/ai/voiceChat")
        .match_query(query(&[("chatId", "3-1727251200000"), ("path", "uploads/voice")]))
        .match_body(Matcher::Regex(r#"name="prompt"; filename="question.wav""#.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(voice_reply_body())
        .create_async()
        .await;

    let audio = FileUpload::new(b"RIFF....WAVE".to_vec(), "question.wav");
    let reply = fixture
        .client()
        .send_voice_message("3-1727251200000", &audio, Some("uploads/voice"))
        .await
        .unwrap();

    assert_eq!(
        reply.agent_voice.as_deref(),
        Some("https://oss.example.com/tts/reply.mp3")
    );
    assert_eq!(reply.timestamp, Some(1_727_251_200_123));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_voice_message_is_resent_once_after_failure() {
    let mut fixture = MockServerFixture::new().await;
    let failing = fixture
        .server
        .mock("POST", "/ai/voiceChat")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("bad gateway")
        .expect(1)
        .create_async()
        .await;
    let succeeding = fixture
        .server
        .mock("POST", "/ai/voiceChat")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(voice_reply_body())
        .expect(1)
        .create_async()
        .await;

    let audio = FileUpload::new(b"RIFF....WAVE".to_vec(), "question.wav");
    let reply = fixture
        .client()
        .send_voice_message("3-1727251200000", &audio, None)
        .await
        .unwrap();

    assert!(reply.user_voice.is_some());
    failing.assert_async().await;
    succeeding.assert_async().await;
}

#[tokio::test]
async fn test_voice_message_is_resent_after_undecodable_reply() {
    let mut fixture = MockServerFixture::new().await;
    let html = fixture
        .server
        .mock("POST", "/ai/voiceChat")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>gateway</html>")
        .expect(1)
        .create_async()
        .await;
    let succeeding = fixture
        .server
        .mock("POST", "/ai/voiceChat")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(voice_reply_body())
        .expect(1)
        .create_async()
        .await;

    let audio = FileUpload::new(b"RIFF....WAVE".to_vec(), "question.wav");
    let reply = fixture
        .client()
        .send_voice_message("3-1727251200000", &audio, None)
        .await
        .unwrap();

    assert_eq!(
        reply.agent_voice.as_deref(),
        Some("https://oss.example.com/tts/reply.mp3")
    );
    html.assert_async().await;
    succeeding.assert_async().await;
}

#[tokio::test]
async fn test_voice_fallback_gives_up_after_second_failure() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/ai/voiceChat")
        .match_query(Matcher::Any)
        .with_status(500)
        .expect(2)
        .create_async()
        .await;

    let audio = FileUpload::new(b"RIFF".to_vec(), "question.wav");
    let err = fixture
        .client()
        .send_voice_message("3-1727251200000", &audio, None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_voice_without_fallback_sends_once() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .server
        .mock("POST", "/ai/voiceChat")
        .match_query(Matcher::Any)
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let client = fixture.builder().voice_fallback(false).build().unwrap();
    let audio = FileUpload::new(b"RIFF".to_vec(), "question.wav");
    let err = client
        .send_voice_message("3-1727251200000", &audio, None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    mock.assert_async().await;
}
