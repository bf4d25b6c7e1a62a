//! Complete runs against mock services.

use chrono::NaiveDate;
use lunchline_cli::config::DateSelection;
use lunchline_cli::run::{run, run_for_date};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{
    daily_payload, daily_school, monday, run_config, weekly_payload, weekly_school, with_weather,
};

const SEND_PATH: &str = "/bot123456:test-token/sendMessage";
const MAIL_PATH: &str = "/mg.example.org/messages";
const SOUTH_WEEK: &str = "/menu/api/weeks/school/south/menu-type/lunch/2024/03/04";

async fn mount_weekly(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(SOUTH_WEEK))
        .respond_with(ResponseTemplate::new(200).set_body_json(weekly_payload()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_weekly_menu_delivered_to_telegram_and_email() {
    let server = MockServer::start().await;
    mount_weekly(&server).await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_string_contains("chat_id=-100"))
        .and(body_string_contains(
            "text=Lunch+for+Monday%2C+March+04%2C+2024+is%3A",
        ))
        .and(body_string_contains("Pizza+with+Breadsticks"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(MAIL_PATH))
        .and(body_string_contains("to=parent%40example.org"))
        .and(body_string_contains("subject=Lunch+Menu"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = run_config(&server, vec![weekly_school(&server, "south", "South Elementary")]);
    let summary = run(&config).await.expect("run should succeed");

    assert_eq!(summary.date, monday());
    assert_eq!(summary.sent, 1);
    assert_eq!(summary.empty, 0);
}

#[tokio::test]
async fn test_two_schools_with_headings_and_chat_override() {
    let server = MockServer::start().await;
    mount_weekly(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/CalendarView/GetDailyMenuitems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_payload()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_string_contains("chat_id=-100"))
        .and(body_string_contains("South+Elementary"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_string_contains("chat_id=-200"))
        .and(body_string_contains("Butts+Road"))
        .and(body_string_contains("Tacos"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(MAIL_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let config = run_config(
        &server,
        vec![
            weekly_school(&server, "south", "South Elementary"),
            daily_school(&server, "butts", "Butts Road"),
        ],
    );
    let summary = run_for_date(&config, monday()).await.unwrap();

    assert_eq!(summary.sent, 2);
}

#[tokio::test]
async fn test_weekend_makes_no_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weekly_payload()))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = run_config(&server, vec![weekly_school(&server, "south", "South")]);
    let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    config.date = DateSelection::Fixed(sunday);

    let summary = run(&config).await.unwrap();

    assert!(summary.weekend);
    assert_eq!(summary.sent, 0);
}

#[tokio::test]
async fn test_empty_menu_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SOUTH_WEEK))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "days": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = run_config(&server, vec![weekly_school(&server, "south", "South")]);
    let summary = run(&config).await.unwrap();

    assert_eq!(summary.empty, 1);
    assert_eq!(summary.sent, 0);
}

#[tokio::test]
async fn test_telegram_failure_still_sends_email_then_fails() {
    let server = MockServer::start().await;
    mount_weekly(&server).await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(MAIL_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = run_config(&server, vec![weekly_school(&server, "south", "South")]);
    let err = run(&config).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("1 of 2 deliveries failed"), "{message}");
    assert!(message.contains("telegram"), "{message}");
    assert!(!message.contains("test-token"), "{message}");
}

#[tokio::test]
async fn test_weather_block_appended() {
    let server = MockServer::start().await;
    mount_weekly(&server).await;
    Mock::given(method("GET"))
        .and(path("/Chesapeake"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{ "date": "2024-03-04", "hourly": [
                { "time": "600", "tempF": "41", "weatherDesc": [{ "value": "Sunny" }] }
            ]}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_string_contains("Weather%3A"))
        .and(body_string_contains("6+AM+-+41%C2%B0F+-+Sunny"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(MAIL_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = with_weather(
        run_config(&server, vec![weekly_school(&server, "south", "South")]),
        &server,
    );
    run(&config).await.unwrap();
}

#[tokio::test]
async fn test_weather_failure_is_not_fatal() {
    let server = MockServer::start().await;
    mount_weekly(&server).await;
    Mock::given(method("GET"))
        .and(path("/Chesapeake"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let config = with_weather(
        run_config(&server, vec![weekly_school(&server, "south", "South")]),
        &server,
    );
    let summary = run(&config).await.unwrap();

    assert_eq!(summary.sent, 1);
}

#[tokio::test]
async fn test_dry_run_sends_nothing() {
    let server = MockServer::start().await;
    mount_weekly(&server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = run_config(&server, vec![weekly_school(&server, "south", "South")]);
    config.dry_run = true;

    let summary = run(&config).await.unwrap();

    assert_eq!(summary.sent, 1);
}

#[tokio::test]
async fn test_skip_flags_per_destination_and_school() {
    let server = MockServer::start().await;
    mount_weekly(&server).await;
    Mock::given(method("GET"))
        .and(path_regex("^/api/CalendarView/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_payload()))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(MAIL_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut skipped = daily_school(&server, "butts", "Butts Road");
    skipped.skip = true;
    let mut config = run_config(&server, vec![weekly_school(&server, "south", "South"), skipped]);
    config.skip_telegram = true;

    let summary = run(&config).await.unwrap();

    assert_eq!(summary.sent, 1);
    assert_eq!(summary.skipped, 1);
}
