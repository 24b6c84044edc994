// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonical calendar-day keys and clock-time parsing.
//!
//! Day keys correlate a plan's time-window map, a response's time-window map,
//! and the aggregator's day iteration. All three must derive keys through the
//! same function or matching silently fails, so this module is the only place
//! a key is ever produced or parsed.

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

/// The canonical day-key format: zero-padded `YYYY-MM-DD` (UTC calendar day).
const DAY_KEY_FORMAT: &[time::format_description::BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// Derives the canonical `YYYY-MM-DD` key for a calendar day.
#[must_use]
pub fn day_key(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a canonical `YYYY-MM-DD` key back into a calendar day.
///
/// # Errors
///
/// Returns an error if the string is not a valid day key.
pub fn parse_day_key(key: &str) -> Result<Date, DomainError> {
    Date::parse(key, DAY_KEY_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: key.to_string(),
        error: e.to_string(),
    })
}

/// Parses a zero-padded 24-hour `HH:mm` clock time into minutes past midnight.
///
/// Returns `None` for anything that is not a clock time within one day.
/// `24:00` is accepted so a window may end exactly at midnight.
#[must_use]
pub fn parse_clock(clock: &str) -> Option<u16> {
    let (hours_str, minutes_str) = clock.split_once(':')?;
    if hours_str.len() != 2 || minutes_str.len() != 2 {
        return None;
    }
    let hours: u16 = hours_str.parse().ok()?;
    let minutes: u16 = minutes_str.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    let total: u16 = hours * 60 + minutes;
    if total > 24 * 60 {
        return None;
    }
    Some(total)
}

/// Lists every calendar day in the inclusive range `[start, end]`, ascending.
///
/// An inverted range yields an empty list.
#[must_use]
pub fn days_between(start: Date, end: Date) -> Vec<Date> {
    let mut days: Vec<Date> = Vec::new();
    let mut current: Date = start;
    while current <= end {
        days.push(current);
        match current.next_day() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}
