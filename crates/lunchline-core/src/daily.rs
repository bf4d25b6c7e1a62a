//! Transform for the daily menu API.
//!
//! The daily API answers with an object keyed by meal category, each holding
//! a list of `{ "MenuItemDescription": ... }` entries. Only one key is read;
//! there is no section grouping and no with-merging.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::menu::{FlatMenu, Menu};
use crate::message::MessageComposer;

/// Meal category read when none is configured.
pub const DEFAULT_MEAL_KEY: &str = "ENTREES";

/// Field holding the dish name in each entry.
pub const DESCRIPTION_FIELD: &str = "MenuItemDescription";

/// Collects the descriptions listed under `meal_key`.
///
/// A missing key yields an empty menu; entries without a string description
/// are skipped. String descriptions are kept as sent, blank ones included. Fails only when `payload` is not a JSON object.
pub fn transform(payload: &Value, meal_key: &str) -> Result<FlatMenu> {
    let Some(object) = payload.as_object() else {
        return Err(Error::parse("daily menu response is not a JSON object"));
    };

    let Some(entries) = object.get(meal_key).and_then(Value::as_array) else {
        tracing::debug!(meal_key, "Daily menu response has no entries for key");
        return Ok(FlatMenu::default());
    };

    let dishes = entries
        .iter()
        .filter_map(|entry| entry.get(DESCRIPTION_FIELD).and_then(Value::as_str))
        .map(str::to_string)
        .collect();

    Ok(FlatMenu { dishes })
}

/// Parses a raw response body and renders the full message: the header line
/// followed by one description per line, or an empty string when nothing is
/// listed.
pub fn format_daily(body: &str, meal_key: &str, date: NaiveDate) -> Result<String> {
    let payload: Value = serde_json::from_str(body)?;
    let menu = transform(&payload, meal_key)?;
    Ok(MessageComposer::new(date)
        .compose(&Menu::Flat(menu))
        .unwrap_or_default())
}
