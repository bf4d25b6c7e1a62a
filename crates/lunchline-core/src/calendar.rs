//! Target-date helpers.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Returns `true` for Saturday and Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parses an IANA timezone name such as `America/New_York`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| Error::config(format!("unknown timezone: {name}")))
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| Error::invalid_date(input))
}

/// The local calendar date of `now` shifted by `offset_days` (negative
/// offsets go back in time).
pub fn target_date(now: DateTime<Tz>, offset_days: i64) -> Result<NaiveDate> {
    let today = now.date_naive();
    let shifted = if offset_days >= 0 {
        today.checked_add_days(Days::new(offset_days.unsigned_abs()))
    } else {
        today.checked_sub_days(Days::new(offset_days.unsigned_abs()))
    };
    shifted.ok_or_else(|| Error::config(format!("day offset out of range: {offset_days}")))
}

/// Today's target date in `tz`, shifted by `offset_days`.
pub fn target_date_in(tz: Tz, offset_days: i64) -> Result<NaiveDate> {
    target_date(Utc::now().with_timezone(&tz), offset_days)
}
