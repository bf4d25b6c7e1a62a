//! Message composition.
//!
//! Turns a [`Menu`] into the text that is sent to Telegram and email:
//!
//! ```text
//! Lunch for Monday, March 04, 2024 is:
//!
//! *Southeastern Elementary*:
//! Entrées:
//! - Pizza with Breadsticks
//!
//! *Weather*:
//! 6 AM - 41°F - Sunny
//! ```
//!
//! The school heading and weather block are optional. Markdown output is for
//! Telegram's legacy `Markdown` parse mode: headings are emphasized and every
//! other `_`, `*`, `` ` `` and `[` is escaped.

use chrono::NaiveDate;

use crate::menu::Menu;

/// `strftime` pattern for the long date in the header.
pub const LONG_DATE_FORMAT: &str = "%A, %B %d, %Y";

/// Header line for a day's message, without a trailing newline.
pub fn lunch_header(date: NaiveDate) -> String {
    format!("Lunch for {} is:", date.format(LONG_DATE_FORMAT))
}

/// Builds the outgoing message for one school and one day.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    date: NaiveDate,
    school: Option<String>,
    weather: Option<String>,
    markdown: bool,
}

impl MessageComposer {
    /// Creates a composer for `date` with no heading, weather or markup.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            school: None,
            weather: None,
            markdown: false,
        }
    }

    /// Adds a school-name heading above the menu body.
    pub fn with_school(mut self, name: impl Into<String>) -> Self {
        self.school = Some(name.into());
        self
    }

    /// Appends a weather block after the menu body.
    pub fn with_weather(mut self, weather: Option<String>) -> Self {
        self.weather = weather.filter(|w| !w.trim().is_empty());
        self
    }

    /// Emphasizes headings with Markdown `*bold*` and escapes the rest.
    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    /// Composes the message, or `None` when the menu is empty.
    pub fn compose(&self, menu: &Menu) -> Option<String> {
        if menu.is_empty() {
            return None;
        }

        let mut out = lunch_header(self.date);
        out.push('\n');

        if matches!(menu, Menu::Sectioned(_)) || self.school.is_some() {
            out.push('\n');
        }
        if let Some(school) = &self.school {
            out.push_str(&self.heading(school));
            out.push('\n');
        }

        out.push_str(&self.text(&menu.render_body()));

        if let Some(weather) = &self.weather {
            if !out.ends_with("\n\n") {
                out.push('\n');
            }
            out.push_str(&self.heading("Weather"));
            out.push('\n');
            out.push_str(&self.text(weather));
            if !weather.ends_with('\n') {
                out.push('\n');
            }
        }

        Some(out)
    }

    fn heading(&self, text: &str) -> String {
        if self.markdown {
            format!("*{}*:", escape_markdown(text))
        } else {
            format!("{text}:")
        }
    }

    fn text(&self, text: &str) -> String {
        if self.markdown {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Backslash-escapes the characters Telegram's legacy `Markdown` mode treats
/// as entity delimiters.
///
/// ```
/// use lunchline_core::message::escape_markdown;
///
/// assert_eq!(escape_markdown("Mac_n_Cheese *new*"), "Mac\\_n\\_Cheese \\*new\\*");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
