//! Character management

use crate::integration::mock_server::{query, MockServerFixture};
use mockito::Matcher;
use serde_json::{json, Value};
use voicechat_client::{Character, Error};

#[tokio::test]
async fn test_character_page() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_result(
            "GET",
            "/character/getPage",
            query(&[("currentPage", "2"), ("pageSize", "5")]),
            json!({
                "records": [
                    {
                        "id": 6,
                        "name": "小智",
                        "description": "一个乐于助人的助手",
                        "image": "https://oss.example.com/uploads/6.png",
                        "promt": "你是小智。",
                        "voiceModel": "edge-tts",
                        "voice": "zh-CN-XiaoxiaoNeural"
                    }
                ],
                "total": 6,
                "size": 5,
                "current": 2,
                "pages": 2
            }),
        )
        .await;

    let page = fixture.client().get_character_page(2, 5).await.unwrap();

    assert_eq!(page.total, 6);
    assert!(!page.has_next());
    let c = &page.records[0];
    assert_eq!(c.id, Some(6));
    assert_eq!(c.prompt.as_deref(), Some("你是小智。"));
    assert_eq!(c.voice.as_deref(), Some("zh-CN-XiaoxiaoNeural"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_zero_page_is_rejected() {
    let fixture = MockServerFixture::new().await;
    let err = fixture.client().get_character_page(0, 10).await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[tokio::test]
async fn test_create_character_sends_fields_as_query() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_result(
            "GET",
            "/character/create",
            query(&[
                ("name", "Alice"),
                ("description", "A patient tutor"),
                ("promt", "You are Alice, a patient tutor."),
                ("voiceModel", "edge-tts"),
                ("voice", "en-US-AriaNeural"),
            ]),
            Value::Null,
        )
        .await;

    let character = Character::new("Alice")
        .with_description("A patient tutor")
        .with_prompt("You are Alice, a patient tutor.")
        .with_voice("edge-tts", "en-US-AriaNeural");
    let data = fixture.client().create_character(&character).await.unwrap();

    assert_eq!(data, Value::Null);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_character() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_result(
            "GET",
            "/character/update",
            query(&[("id", "6"), ("image", "https://oss.example.com/uploads/new.png")]),
            Value::Null,
        )
        .await;

    let character = Character::default()
        .with_id(6)
        .with_image("https://oss.example.com/uploads/new.png");
    fixture.client().update_character(&character).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_update_without_id_is_rejected() {
    let fixture = MockServerFixture::new().await;
    let err = fixture
        .client()
        .update_character(&Character::new("Nobody"))
        .await
        .unwrap_err();
    assert_eq!(
        err.context().and_then(|c| c.field_path.as_deref()),
        Some("character.id")
    );
}

#[tokio::test]
async fn test_delete_character() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_result("GET", "/character/delete", query(&[("id", "6")]), Value::Null)
        .await;

    fixture.client().delete_character(6).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_strict_envelope_surfaces_backend_failure() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("GET", "/character/create")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":0,"msg":"创建角色失败","data":null}"#)
        .create_async()
        .await;

    let lenient = fixture.client();
    assert_eq!(
        lenient.create_character(&Character::new("Alice")).await.unwrap(),
        Value::Null
    );

    let strict = fixture.builder().strict_envelope(true).build().unwrap();
    match strict.create_character(&Character::new("Alice")).await {
        Err(Error::Api { code, message }) => {
            assert_eq!(code, 0);
            assert_eq!(message, "创建角色失败");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}
