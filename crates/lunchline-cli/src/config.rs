//! School roster file and the resolved run configuration.
//!
//! ```toml
//! [[school]]
//! key = "southeastern"
//! name = "Southeastern Elementary"
//! telegram_chat_id = "-100123"
//! [school.source]
//! kind = "weekly"
//! host = "cpschools.api.nutrislice.com"
//! school = "southeastern-elementary"
//!
//! [weather]
//! location = "Chesapeake"
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use chrono_tz::Tz;
use lunchline_core::calendar;
use lunchline_core::{Error, Result};
use serde::Deserialize;

use crate::cli::{Args, clean_list};

// ============================================================================
// Roster file
// ============================================================================

/// Contents of the roster file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Roster {
    /// Schools in delivery order.
    #[serde(rename = "school", default)]
    pub schools: Vec<School>,

    /// Optional forecast block.
    #[serde(default)]
    pub weather: Option<WeatherConfig>,
}

/// One school and where its menu comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct School {
    /// Short identifier used by `--skip`.
    pub key: String,
    /// Display name, used as the message heading.
    pub name: String,
    /// Chat id overriding `--telegram-chat-id`.
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
    /// Suppresses delivery for this school.
    #[serde(default)]
    pub skip: bool,
    /// Menu API settings.
    pub source: SourceConfig,
}

/// Menu API family and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// Week-at-a-time API with sections.
    Weekly {
        /// API host, or a full base URL with scheme.
        host: String,
        /// School slug in the URL path.
        school: String,
        /// Menu type slug [default: lunch].
        #[serde(default)]
        menu_type: Option<String>,
    },
    /// One-day API with a flat entrée list.
    Daily {
        /// School id (GUID).
        school_id: String,
        /// Serving line name [default: Main Line].
        #[serde(default)]
        serving_line: Option<String>,
        /// Response key holding the entrées [default: ENTREES].
        #[serde(default)]
        meal_key: Option<String>,
        /// Grade for the per-grade endpoint.
        #[serde(default)]
        grade: Option<String>,
        /// Base URL override.
        #[serde(default)]
        base_url: Option<String>,
    },
}

/// Forecast settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    /// Location as wttr.in accepts it.
    pub location: String,
    /// Base URL override.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Roster {
    /// Reads and validates a roster file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read roster {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates roster TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let roster: Roster = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
        check_source_keys(content)?;
        roster.validate()?;
        Ok(roster)
    }

    fn validate(&self) -> Result<()> {
        if self.schools.is_empty() {
            return Err(Error::config("roster has no [[school]] entries"));
        }

        let mut keys = HashSet::new();
        for school in &self.schools {
            if school.key.trim().is_empty() {
                return Err(Error::config("school key must not be empty"));
            }
            if school.name.trim().is_empty() {
                return Err(Error::config(format!("school '{}' has no name", school.key)));
            }
            if !keys.insert(school.key.as_str()) {
                return Err(Error::config(format!("duplicate school key '{}'", school.key)));
            }
            school.source.validate(&school.key)?;
        }

        if let Some(weather) = &self.weather
            && weather.location.trim().is_empty()
        {
            return Err(Error::config("weather location must not be empty"));
        }
        Ok(())
    }
}

/// Keys each `[school.source]` kind accepts.
const WEEKLY_SOURCE_KEYS: &[&str] = &["kind", "host", "school", "menu_type"];
const DAILY_SOURCE_KEYS: &[&str] = &[
    "kind",
    "school_id",
    "serving_line",
    "meal_key",
    "grade",
    "base_url",
];

/// Rejects `[school.source]` keys the source kind does not know.
///
/// serde cannot deny unknown fields on an internally tagged enum, so a
/// misspelled optional key would otherwise fall back to its default.
fn check_source_keys(content: &str) -> Result<()> {
    let value: toml::Table = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
    let Some(schools) = value.get("school").and_then(toml::Value::as_array) else {
        return Ok(());
    };

    for school in schools {
        let key = school.get("key").and_then(toml::Value::as_str).unwrap_or("?");
        let Some(source) = school.get("source").and_then(toml::Value::as_table) else {
            continue;
        };
        let allowed = match source.get("kind").and_then(toml::Value::as_str) {
            Some("weekly") => WEEKLY_SOURCE_KEYS,
            Some("daily") => DAILY_SOURCE_KEYS,
            _ => continue,
        };
        if let Some(unknown) = source.keys().find(|k| !allowed.contains(&k.as_str())) {
            return Err(Error::config(format!(
                "school '{key}': unknown source key '{unknown}'"
            )));
        }
    }
    Ok(())
}

impl SourceConfig {
    fn validate(&self, key: &str) -> Result<()> {
        let missing = match self {
            SourceConfig::Weekly { host, school, .. } => {
                if host.trim().is_empty() {
                    Some("host")
                } else if school.trim().is_empty() {
                    Some("school")
                } else {
                    None
                }
            }
            SourceConfig::Daily { school_id, .. } => {
                school_id.trim().is_empty().then_some("school_id")
            }
        };
        match missing {
            Some(field) => Err(Error::config(format!("school '{key}': source.{field} is empty"))),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Resolved configuration
// ============================================================================

/// Telegram settings resolved from arguments.
#[derive(Clone)]
pub struct TelegramSettings {
    /// Bot token.
    pub token: String,
    /// Chat id for schools without their own.
    pub default_chat_id: Option<String>,
    /// `parse_mode` sent with every message.
    pub parse_mode: Option<String>,
    /// API host override.
    pub api_base: Option<String>,
}

impl fmt::Debug for TelegramSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramSettings")
            .field("token", &"<redacted>")
            .field("default_chat_id", &self.default_chat_id)
            .field("parse_mode", &self.parse_mode)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Mailgun settings resolved from arguments.
#[derive(Clone)]
pub struct EmailSettings {
    /// API key.
    pub api_key: String,
    /// Sending domain.
    pub domain: String,
    /// Sender override.
    pub from: Option<String>,
    /// Recipients, in delivery order.
    pub recipients: Vec<String>,
    /// API root override.
    pub api_base: Option<String>,
}

impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("api_key", &"<redacted>")
            .field("domain", &self.domain)
            .field("from", &self.from)
            .field("recipients", &self.recipients)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// How the target date is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelection {
    /// A fixed date.
    Fixed(NaiveDate),
    /// Today in the timezone, shifted by a number of days.
    Relative {
        /// Timezone deciding what today is.
        timezone: Tz,
        /// Days after today.
        offset_days: i64,
    },
}

impl DateSelection {
    /// The date to send the menu for.
    pub fn resolve(&self) -> Result<NaiveDate> {
        match *self {
            DateSelection::Fixed(date) => Ok(date),
            DateSelection::Relative {
                timezone,
                offset_days,
            } => calendar::target_date_in(timezone, offset_days),
        }
    }
}

/// Everything one run needs, with no further environment lookups.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Target date selection.
    pub date: DateSelection,
    /// Schools in delivery order, with skip flags already applied.
    pub schools: Vec<School>,
    /// Forecast settings.
    pub weather: Option<WeatherConfig>,
    /// `None` disables Telegram.
    pub telegram: Option<TelegramSettings>,
    /// `None` disables email.
    pub email: Option<EmailSettings>,
    /// Suppresses Telegram for every school.
    pub skip_telegram: bool,
    /// Suppresses email for every school.
    pub skip_email: bool,
    /// Print instead of sending.
    pub dry_run: bool,
}

impl RunConfig {
    /// Loads the roster named in `args` and resolves the rest.
    pub fn from_args(args: &Args) -> Result<Self> {
        let roster = Roster::load(&args.config)?;
        Self::resolve(args, roster)
    }

    /// Combines parsed arguments with an already loaded roster.
    pub fn resolve(args: &Args, roster: Roster) -> Result<Self> {
        let date = match args.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(date) => DateSelection::Fixed(calendar::parse_date(date)?),
            None => DateSelection::Relative {
                timezone: calendar::parse_timezone(&args.timezone)?,
                offset_days: args.day_offset,
            },
        };

        let skip: HashSet<String> = clean_list(&args.skip).into_iter().collect();
        let mut schools = roster.schools;
        for school in &mut schools {
            if skip.contains(&school.key) {
                school.skip = true;
            }
        }
        for key in &skip {
            if !schools.iter().any(|s| &s.key == key) {
                tracing::warn!(school = %key, "Skip flag names an unknown school");
            }
        }

        let parse_mode = non_blank(&args.telegram_parse_mode)
            .map(|mode| check_parse_mode(&mode))
            .transpose()?;
        let telegram = non_blank(&args.telegram_token).map(|token| TelegramSettings {
            token,
            default_chat_id: non_blank(&args.telegram_chat_id),
            parse_mode,
            api_base: non_blank(&args.telegram_api_base),
        });

        let recipients = clean_list(&args.email_addresses);
        let email = if recipients.is_empty() {
            None
        } else {
            match (non_blank(&args.mailgun_api_key), non_blank(&args.mailgun_domain)) {
                (Some(api_key), Some(domain)) => Some(EmailSettings {
                    api_key,
                    domain,
                    from: non_blank(&args.email_from),
                    recipients,
                    api_base: non_blank(&args.mailgun_api_base),
                }),
                _ if args.dry_run || args.skip_email => None,
                _ => {
                    return Err(Error::config(
                        "EMAIL_ADDRESSES is set but MAILGUN_API_KEY or MAILGUN_DOMAIN is missing",
                    ));
                }
            }
        };

        Ok(Self {
            date,
            schools,
            weather: roster.weather,
            telegram,
            email,
            skip_telegram: args.skip_telegram,
            skip_email: args.skip_email,
            dry_run: args.dry_run,
        })
    }

    /// Whether messages are composed as Telegram Markdown.
    pub fn markdown(&self) -> bool {
        self.telegram
            .as_ref()
            .is_some_and(|t| t.parse_mode.is_some())
    }
}

/// Accepts Telegram's legacy `Markdown` mode, the only one the composer escapes for.
fn check_parse_mode(mode: &str) -> Result<String> {
    if mode.eq_ignore_ascii_case("markdown") {
        Ok("Markdown".to_string())
    } else {
        Err(Error::config(format!(
            "unsupported Telegram parse mode '{mode}' (only Markdown is supported)"
        )))
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
