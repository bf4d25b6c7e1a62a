//! Weekly client against a mock server.

use lunchline_core::Menu;
use lunchline_sources::{Error, MenuSource, WeeklyMenuApi};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{harness, monday, weekly_payload};

const WEEK_PATH: &str =
    "/menu/api/weeks/school/southeastern-elementary/menu-type/lunch/2024/03/04";

#[tokio::test]
async fn test_weekly_fetch_groups_sections() {
    let (server, client) = harness().await;
    Mock::given(method("GET"))
        .and(path(WEEK_PATH))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weekly_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let api = WeeklyMenuApi::new(client, "unused.invalid", "southeastern-elementary")
        .with_base_url(server.uri());
    let menu = api.fetch_menu(monday()).await.expect("fetch should succeed");

    let Menu::Sectioned(menu) = menu else {
        panic!("weekly source should return a sectioned menu");
    };
    assert_eq!(menu.sections().len(), 2);
    assert_eq!(
        menu.section("Entrées").unwrap().dishes,
        vec!["Cheese Pizza with Garlic Breadstick"]
    );
    assert_eq!(menu.section("Sides").unwrap().dishes, vec!["Steamed Broccoli"]);
}

#[tokio::test]
async fn test_weekly_fetch_day_without_items_is_empty() {
    let (server, client) = harness().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weekly_payload()))
        .mount(&server)
        .await;

    let api = WeeklyMenuApi::new(client, "unused.invalid", "southeastern-elementary")
        .with_base_url(server.uri());
    let sunday = chrono::NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
    let menu = api.fetch_menu(sunday).await.unwrap();

    assert!(menu.is_empty());
}

#[tokio::test]
async fn test_weekly_fetch_missing_days_is_empty() {
    let (server, client) = harness().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "start_date": null })))
        .mount(&server)
        .await;

    let api = WeeklyMenuApi::new(client, "unused.invalid", "north").with_base_url(server.uri());
    let menu = api.fetch_menu(monday()).await.unwrap();

    assert!(menu.is_empty());
}

#[tokio::test]
async fn test_weekly_fetch_server_error() {
    let (server, client) = harness().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = WeeklyMenuApi::new(client, "unused.invalid", "north").with_base_url(server.uri());
    let err = api.fetch_menu(monday()).await.unwrap_err();

    assert!(matches!(err, Error::Status { status: 503, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_weekly_fetch_invalid_json() {
    let (server, client) = harness().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let api = WeeklyMenuApi::new(client, "unused.invalid", "north").with_base_url(server.uri());
    let err = api.fetch_menu(monday()).await.unwrap_err();

    assert!(matches!(err, Error::Json { .. }), "got {err:?}");
}
