//! Wall-clock and weekday helpers.
//!
//! Times of day travel as `HH:MM` strings (24h) on the wire and in the database,
//! and as [`NaiveTime`] everywhere else. Weekdays are numbered `0..=6` with
//! `0 = Sunday`.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer};

use crate::errors::{CareError, CareResult};

pub const CLOCK_FORMAT: &str = "%H:%M";

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Parses an `HH:MM` string into a [`NaiveTime`].
pub fn parse_clock(value: &str) -> CareResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).map_err(|_| {
        CareError::Validation(format!("Invalid time '{}', expected HH:MM", value))
    })
}

pub fn format_clock(time: NaiveTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

pub fn validate_day_of_week(day: u8) -> CareResult<u8> {
    if day <= 6 {
        Ok(day)
    } else {
        Err(CareError::Validation(format!(
            "day_of_week must be between 0 (Sunday) and 6 (Saturday), got {}",
            day
        )))
    }
}

/// Weekday index of a calendar date, `0 = Sunday`.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn day_name(day: u8) -> &'static str {
    DAY_NAMES.get(day as usize).copied().unwrap_or("Invalid")
}

/// Serde adapter for `NaiveTime` fields rendered as `HH:MM`.
pub mod hhmm {
    use super::*;

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_clock(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_clock(&raw).map_err(serde::de::Error::custom)
    }
}
