//! Daily client against a mock server.

use lunchline_core::Menu;
use lunchline_sources::{DailyMenuApi, Error, MenuSource};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{daily_payload, harness, monday};

#[tokio::test]
async fn test_daily_fetch_lists_entrees() {
    let (server, client) = harness().await;
    Mock::given(method("GET"))
        .and(path("/api/CalendarView/GetDailyMenuitems"))
        .and(query_param("SchoolId", "ccff3367"))
        .and(query_param("ServingDate", "03/04/2024"))
        .and(query_param("ServingLine", "Standard Line"))
        .and(query_param("MealType", "Lunch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let api = DailyMenuApi::new(client, "ccff3367")
        .with_base_url(server.uri())
        .with_serving_line("Standard Line");
    let menu = api.fetch_menu(monday()).await.expect("fetch should succeed");

    let Menu::Flat(menu) = menu else {
        panic!("daily source should return a flat menu");
    };
    assert_eq!(menu.dishes, vec!["Chicken Nuggets", "Veggie Burger"]);
}

#[tokio::test]
async fn test_daily_fetch_by_grade_with_meal_key() {
    let (server, client) = harness().await;
    Mock::given(method("GET"))
        .and(path("/api/CalendarView/GetDailyMenuitemsByGrade"))
        .and(query_param("Grade", "02"))
        .and(query_param("PersonId", "null"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "LUNCH": [{ "MenuItemDescription": "Spaghetti" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = DailyMenuApi::new(client, "6809b286")
        .with_base_url(server.uri())
        .with_grade(Some("02".to_string()))
        .with_meal_key("LUNCH");
    let menu = api.fetch_menu(monday()).await.unwrap();

    assert_eq!(menu.dish_count(), 1);
}

#[tokio::test]
async fn test_daily_fetch_missing_key_is_empty() {
    let (server, client) = harness().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let api = DailyMenuApi::new(client, "ccff3367").with_base_url(server.uri());
    let menu = api.fetch_menu(monday()).await.unwrap();

    assert!(menu.is_empty());
}

#[tokio::test]
async fn test_daily_fetch_non_object_body() {
    let (server, client) = harness().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["not", "an", "object"])))
        .mount(&server)
        .await;

    let api = DailyMenuApi::new(client, "ccff3367").with_base_url(server.uri());
    let err = api.fetch_menu(monday()).await.unwrap_err();

    assert!(matches!(err, Error::Core(_)), "got {err:?}");
}
