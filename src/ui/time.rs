use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::domain::events::Timestamp;

/// Month/day/year with a 12-hour clock, the way browsers print dates for
/// an en-US locale, followed by the UTC offset so a repeated wall-clock
/// hour at a DST change still names a single instant.
pub const DISPLAY_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p %:z";

pub const INVALID_DATE: &str = "Invalid Date";

pub fn format_timestamp<Tz>(timestamp: Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match timestamp.to_datetime() {
        Some(utc) => utc.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Inverse of [`format_timestamp`] at second resolution, whatever zone the
/// text was rendered in.
pub fn parse_display_timestamp(text: &str) -> Option<Timestamp> {
    DateTime::parse_from_str(text.trim(), DISPLAY_FORMAT)
        .ok()
        .map(Timestamp::from)
}
