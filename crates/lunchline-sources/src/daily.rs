//! Client for the daily menu API.

use async_trait::async_trait;
use chrono::NaiveDate;
use lunchline_core::daily::{self, DEFAULT_MEAL_KEY};
use lunchline_core::Menu;

use crate::error::{Error, Result};
use crate::http::get_json;
use crate::MenuSource;

/// Production host of the daily menu API.
pub const DEFAULT_BASE_URL: &str = "https://webapis.schoolcafe.com";

/// Serving line requested when none is configured.
pub const DEFAULT_SERVING_LINE: &str = "Main Line";

/// Daily menu endpoint for one school.
///
/// Without a grade this calls `GetDailyMenuitems`; with a grade it calls
/// `GetDailyMenuitemsByGrade` and adds `Grade` and `PersonId=null`.
#[derive(Debug, Clone)]
pub struct DailyMenuApi {
    client: reqwest::Client,
    base_url: String,
    school_id: String,
    serving_line: String,
    meal_type: String,
    meal_key: String,
    grade: Option<String>,
}

impl DailyMenuApi {
    /// Creates a client for the school with the given API id.
    pub fn new(client: reqwest::Client, school_id: impl Into<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            school_id: school_id.into(),
            serving_line: DEFAULT_SERVING_LINE.to_string(),
            meal_type: "Lunch".to_string(),
            meal_key: DEFAULT_MEAL_KEY.to_string(),
            grade: None,
        }
    }

    /// Overrides scheme and host (used to point at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the serving line (e.g. `Standard Line`).
    pub fn with_serving_line(mut self, serving_line: impl Into<String>) -> Self {
        self.serving_line = serving_line.into();
        self
    }

    /// Sets the response key holding the entrées (e.g. `LUNCH`).
    pub fn with_meal_key(mut self, meal_key: impl Into<String>) -> Self {
        self.meal_key = meal_key.into();
        self
    }

    /// Requests the per-grade variant of the endpoint.
    pub fn with_grade(mut self, grade: Option<String>) -> Self {
        self.grade = grade;
        self
    }

    /// Builds the GET request for `date`.
    pub fn request(&self, date: NaiveDate) -> Result<reqwest::Request> {
        let serving_date = date.format("%m/%d/%Y").to_string();
        let mut params: Vec<(&str, &str)> = vec![
            ("SchoolId", self.school_id.as_str()),
            ("ServingDate", serving_date.as_str()),
            ("ServingLine", self.serving_line.as_str()),
            ("MealType", self.meal_type.as_str()),
        ];

        let endpoint = match &self.grade {
            Some(grade) => {
                params.push(("Grade", grade.as_str()));
                params.push(("PersonId", "null"));
                "GetDailyMenuitemsByGrade"
            }
            None => "GetDailyMenuitems",
        };

        let url = format!("{}/api/CalendarView/{endpoint}", self.base_url);
        self.client.get(url).query(&params).build().map_err(Error::from)
    }
}

#[async_trait]
impl MenuSource for DailyMenuApi {
    fn kind(&self) -> &'static str {
        "daily"
    }

    async fn fetch_menu(&self, date: NaiveDate) -> Result<Menu> {
        let url = self.request(date)?.url().to_string();
        tracing::info!(school_id = %self.school_id, url = %url, "Loading daily menu");

        let payload = get_json(&self.client, &url).await?;
        let menu = daily::transform(&payload, &self.meal_key)?;

        for item in &menu.dishes {
            tracing::debug!(item = %item, "Menu item");
        }
        tracing::info!(
            school_id = %self.school_id,
            meal_key = %self.meal_key,
            dishes = menu.dishes.len(),
            "Parsed daily menu"
        );
        Ok(Menu::Flat(menu))
    }
}
