//! Client for the weekly menu API.

use async_trait::async_trait;
use chrono::NaiveDate;
use lunchline_core::weekly::{self, WeekMenu};
use lunchline_core::Menu;

use crate::error::Result;
use crate::http::get_json;
use crate::MenuSource;

/// Menu type requested when none is configured.
pub const DEFAULT_MENU_TYPE: &str = "lunch";

/// Weekly menu endpoint for one school.
///
/// ```text
/// GET https://<host>/menu/api/weeks/school/<school>/menu-type/lunch/<yyyy>/<mm>/<dd>?format=json
/// ```
#[derive(Debug, Clone)]
pub struct WeeklyMenuApi {
    client: reqwest::Client,
    base_url: String,
    school: String,
    menu_type: String,
}

impl WeeklyMenuApi {
    /// Creates a client for `school` (the URL slug, e.g.
    /// `southeastern-elementary`) on `host`. A `host` carrying a scheme
    /// (`http://127.0.0.1:9000`) is used as the base URL unchanged.
    pub fn new(client: reqwest::Client, host: &str, school: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url_for(host),
            school: school.into(),
            menu_type: DEFAULT_MENU_TYPE.to_string(),
        }
    }

    /// Overrides scheme and host (used to point at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Requests a different menu type (e.g. `breakfast`).
    pub fn with_menu_type(mut self, menu_type: impl Into<String>) -> Self {
        self.menu_type = menu_type.into();
        self
    }

    /// The URL of the week containing `date`.
    pub fn menu_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/menu/api/weeks/school/{}/menu-type/{}/{}?format=json",
            self.base_url,
            self.school,
            self.menu_type,
            date.format("%Y/%m/%d")
        )
    }
}

#[async_trait]
impl MenuSource for WeeklyMenuApi {
    fn kind(&self) -> &'static str {
        "weekly"
    }

    async fn fetch_menu(&self, date: NaiveDate) -> Result<Menu> {
        let url = self.menu_url(date);
        tracing::info!(school = %self.school, url = %url, "Loading weekly menu");

        let payload = get_json(&self.client, &url).await?;
        let week = WeekMenu::from_value(&payload)?;
        let menu = weekly::transform(&week, date);

        tracing::info!(
            school = %self.school,
            days = week.days.len(),
            sections = menu.sections().len(),
            dishes = menu.dish_count(),
            "Parsed weekly menu"
        );
        Ok(Menu::Sectioned(menu))
    }
}

/// `https://{host}`, or `host` itself when it already names a scheme.
fn base_url_for(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}
