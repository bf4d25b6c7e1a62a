//! Menu and weather API clients for Lunchline.
//!
//! Each menu API family has a client implementing [`MenuSource`]:
//!
//! - [`WeeklyMenuApi`]: week-at-a-time API with section titles and
//!   `"with"` continuation items
//! - [`DailyMenuApi`]: one-day API with a flat entrée list
//!
//! [`WeatherApi`] supplies the optional forecast block. All clients share one
//! `reqwest::Client` built by [`build_client`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod daily;
pub mod error;
pub mod http;
pub mod weather;
pub mod weekly;

use async_trait::async_trait;
use chrono::NaiveDate;
use lunchline_core::Menu;

pub use daily::DailyMenuApi;
pub use error::{Error, Result};
pub use http::build_client;
pub use weather::WeatherApi;
pub use weekly::WeeklyMenuApi;

/// A remote menu for one school.
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Short label for logs (`"weekly"`, `"daily"`).
    fn kind(&self) -> &'static str;

    /// Fetches and transforms the menu served on `date`.
    ///
    /// An empty [`Menu`] means the API had nothing for that day.
    async fn fetch_menu(&self, date: NaiveDate) -> Result<Menu>;
}
