// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use std::fmt::Display;

use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 with millisecond precision and a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Drop sub-millisecond precision so a timestamp survives persistence unchanged.
pub fn truncate_to_millis(date: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(date.timestamp_millis()).unwrap_or(date)
}

/// Month and day as shown in workout titles, e.g. "April 14".
///
/// The calendar day is taken in `date`'s own time zone.
pub fn format_month_day<Tz: TimeZone>(date: DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%B %-d").to_string()
}

/// Month and day of a UTC timestamp on the local calendar.
pub fn format_local_month_day(date: DateTime<Utc>) -> String {
    format_month_day(date.with_timezone(&Local))
}
