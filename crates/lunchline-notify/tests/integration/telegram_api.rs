//! Telegram client against a mock Bot API.

use lunchline_notify::Error;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{server, telegram};

const SEND_PATH: &str = "/bot123456:test-token/sendMessage";

#[tokio::test]
async fn test_send_message_posts_form() {
    let server = server().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("chat_id=-100123"))
        .and(body_string_contains("text=Lunch+for+Monday"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    telegram(&server)
        .send_message("-100123", "Lunch for Monday")
        .await
        .expect("send should succeed");
}

#[tokio::test]
async fn test_send_message_with_parse_mode() {
    let server = server().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_string_contains("parse_mode=Markdown"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    telegram(&server)
        .with_parse_mode(Some("Markdown".to_string()))
        .send_message("-1", "*Menu*")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rejection_carries_status_and_body() {
    let server = server().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"ok":false,"description":"Bad Request: chat not found"}"#),
        )
        .mount(&server)
        .await;

    let err = telegram(&server).send_message("-1", "hi").await.unwrap_err();

    match err {
        Error::Rejected { service, status, body } => {
            assert_eq!(service, "telegram");
            assert_eq!(status, 400);
            assert!(body.contains("chat not found"));
        }
        other => unreachable!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_error_hides_token() {
    let bot = lunchline_notify::TelegramBot::new(reqwest::Client::new(), "123456:test-token")
        .unwrap()
        .with_api_base("http://127.0.0.1:1");

    let err = bot.send_message("-1", "hi").await.unwrap_err();

    assert!(matches!(err, Error::Http(_)));
    assert!(!err.to_string().contains("test-token"));
}
