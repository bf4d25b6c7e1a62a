//! Transform for the weekly menu API.
//!
//! The weekly API returns a whole week of `days`, each holding an ordered
//! `menu_items` list. Items are either section titles, food entries, or
//! standalone `"with"` markers that glue the next food onto the previous
//! dish ("Pizza" + "with" + "Breadsticks" becomes "Pizza with Breadsticks").
//!
//! Anything that is not a section title, a named food or a with-marker is
//! skipped.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::menu::{Menu, Section, SectionedMenu};
use crate::message::MessageComposer;

/// Date format used by the weekly API's `days[].date` field.
pub const DAY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Literal text of a with-continuation item.
const WITH_MARKER: &str = "with";

// ============================================================================
// Raw model
// ============================================================================

/// One classified entry of a day's `menu_items` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    /// Starts a new section; holds the normalized title.
    SectionTitle(String),
    /// A food entry with a name.
    Dish(String),
    /// A `food: null, text: "with"` continuation marker.
    With,
    /// Anything else (icons, blank rows, foods without a name).
    Other,
}

impl MenuItem {
    /// Classifies a raw JSON item.
    pub fn classify(item: &Value) -> Self {
        let text = item.get("text").and_then(Value::as_str);

        if item.get("is_section_title").is_some_and(is_truthy) {
            return match text {
                Some(text) => MenuItem::SectionTitle(normalize_section_title(text)),
                None => MenuItem::Other,
            };
        }

        match item.get("food") {
            None => MenuItem::Other,
            Some(Value::Null) if text == Some(WITH_MARKER) => MenuItem::With,
            Some(Value::Null) => MenuItem::Other,
            Some(food) => food
                .get("name")
                .and_then(Value::as_str)
                .map(|name| MenuItem::Dish(name.to_string()))
                .unwrap_or(MenuItem::Other),
        }
    }
}

/// One entry of the weekly API's `days` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDay {
    /// `YYYY-MM-DD` date string exactly as the API sent it.
    pub date: String,
    /// Classified items in order.
    pub items: Vec<MenuItem>,
}

/// A parsed weekly API response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekMenu {
    /// Days that carried a string `date`.
    pub days: Vec<MenuDay>,
}

impl WeekMenu {
    /// Parses a raw response body.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(&value)
    }

    /// Builds a week from an already-parsed JSON document.
    ///
    /// Fails only when the document is not a JSON object; a missing or
    /// malformed `days` array yields an empty week.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(Error::parse("weekly menu response is not a JSON object"));
        };

        let Some(raw_days) = object.get("days").and_then(Value::as_array) else {
            tracing::warn!("Weekly menu response has no `days` array");
            return Ok(Self::default());
        };

        let days = raw_days
            .iter()
            .filter_map(|day| {
                let date = day.get("date").and_then(Value::as_str)?;
                let items = day
                    .get("menu_items")
                    .and_then(Value::as_array)
                    .map(|items| items.iter().map(MenuItem::classify).collect())
                    .unwrap_or_default();
                Some(MenuDay {
                    date: date.to_string(),
                    items,
                })
            })
            .collect();

        Ok(Self { days })
    }

    /// Days whose date string equals `date`.
    pub fn days_for(&self, date: NaiveDate) -> impl Iterator<Item = &MenuDay> {
        let wanted = date.format(DAY_DATE_FORMAT).to_string();
        self.days.iter().filter(move |day| day.date == wanted)
    }
}

// ============================================================================
// Transform
// ============================================================================

/// Removes `"Choose One"` and `"-"` from a section title and trims it.
///
/// ```
/// use lunchline_core::weekly::normalize_section_title;
///
/// assert_eq!(normalize_section_title("Choose One - Entrées"), "Entrées");
/// assert_eq!(normalize_section_title("Entrées - Choose One"), "Entrées");
/// ```
pub fn normalize_section_title(text: &str) -> String {
    text.replace("Choose One", "").replace('-', "").trim().to_string()
}

/// Groups the items of every day matching `date` into sections.
pub fn transform(week: &WeekMenu, date: NaiveDate) -> SectionedMenu {
    let mut builder = MenuBuilder::default();
    for day in week.days_for(date) {
        for item in &day.items {
            builder.push(item);
        }
    }
    builder.finish()
}

/// Renders the day's menu as a complete message, or an empty string when the
/// date is missing from the week.
pub fn format_week(week: &WeekMenu, date: NaiveDate) -> String {
    let menu = transform(week, date);
    MessageComposer::new(date)
        .compose(&Menu::from(menu))
        .unwrap_or_default()
}

/// The dish currently being assembled.
///
/// It stays open until something other than a with-continuation arrives, so
/// a `"with"` marker and the food after it can still extend it.
#[derive(Debug)]
struct OpenDish {
    name: String,
    awaiting_continuation: bool,
}

#[derive(Debug, Default)]
struct MenuBuilder {
    sections: Vec<Section>,
    current: Option<usize>,
    open: Option<OpenDish>,
}

impl MenuBuilder {
    fn push(&mut self, item: &MenuItem) {
        match item {
            MenuItem::SectionTitle(name) => self.start_section(name),
            // Anything before the first section title is dropped.
            _ if self.current.is_none() => {}
            MenuItem::With => self.mark_with(),
            MenuItem::Dish(name) => self.add_dish(name),
            MenuItem::Other => {}
        }
    }

    fn start_section(&mut self, name: &str) {
        self.close_dish();
        let idx = match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => {
                self.sections[idx].dishes.clear();
                idx
            }
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        self.current = Some(idx);
    }

    fn mark_with(&mut self) {
        // A marker with no dish before it has nothing to attach to.
        if let Some(open) = self.open.as_mut() {
            open.name.push_str(" with");
            open.awaiting_continuation = true;
        }
    }

    fn add_dish(&mut self, name: &str) {
        if let Some(open) = self.open.as_mut().filter(|d| d.awaiting_continuation) {
            open.name.push(' ');
            open.name.push_str(name);
            open.awaiting_continuation = false;
            return;
        }
        self.close_dish();
        self.open = Some(OpenDish {
            name: name.to_string(),
            awaiting_continuation: false,
        });
    }

    fn close_dish(&mut self) {
        if let (Some(dish), Some(idx)) = (self.open.take(), self.current) {
            self.sections[idx].dishes.push(dish.name);
        }
    }

    fn finish(mut self) -> SectionedMenu {
        self.close_dish();
        SectionedMenu::from_sections(self.sections)
    }
}

fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}
