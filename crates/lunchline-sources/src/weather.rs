//! Forecast lookup for the optional weather block.
//!
//! Uses the `j1` JSON format of wttr.in and keeps three readings for the
//! target day: 6 AM, noon and 6 PM.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::Result;
use crate::http::get_json;

/// Production forecast host.
pub const DEFAULT_BASE_URL: &str = "https://wttr.in";

/// `hourly[].time` values kept, with their display labels.
const SLOTS: [(&str, &str); 3] = [("600", "6 AM"), ("1200", "12 PM"), ("1800", "6 PM")];

/// wttr.in forecast client for one location.
#[derive(Debug, Clone)]
pub struct WeatherApi {
    client: reqwest::Client,
    base_url: String,
    location: String,
}

impl WeatherApi {
    /// Creates a client for `location` (a city name as wttr.in accepts it).
    pub fn new(client: reqwest::Client, location: impl Into<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            location: location.into(),
        }
    }

    /// Overrides scheme and host (used to point at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The forecast URL.
    pub fn forecast_url(&self) -> String {
        format!("{}/{}?format=j1", self.base_url, self.location)
    }

    /// Fetches the forecast and summarizes `date`, or `None` when the
    /// forecast does not cover that day.
    pub async fn forecast(&self, date: NaiveDate) -> Result<Option<String>> {
        let url = self.forecast_url();
        tracing::info!(location = %self.location, date = %date, "Getting weather");

        let payload = get_json(&self.client, &url).await?;
        let summary = summarize(&payload, date);
        if summary.is_none() {
            tracing::warn!(date = %date, "No weather found for date");
        }
        Ok(summary)
    }
}

/// Renders `"<slot> - <temp>°F - <description>"` lines for `date`.
pub fn summarize(payload: &Value, date: NaiveDate) -> Option<String> {
    let wanted = date.format("%Y-%m-%d").to_string();
    let day = payload
        .get("weather")?
        .as_array()?
        .iter()
        .find(|day| day.get("date").and_then(Value::as_str) == Some(wanted.as_str()))?;

    let mut out = String::new();
    for hour in day.get("hourly").and_then(Value::as_array).into_iter().flatten() {
        let Some(time) = hour.get("time").and_then(Value::as_str) else {
            continue;
        };
        let Some((_, label)) = SLOTS.iter().find(|(slot, _)| *slot == time) else {
            continue;
        };
        let temp = hour.get("tempF").and_then(Value::as_str).unwrap_or("?");
        let description = hour
            .pointer("/weatherDesc/0/value")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim();
        out.push_str(&format!("{label} - {temp}°F - {description}\n"));
    }

    if out.is_empty() { None } else { Some(out) }
}
