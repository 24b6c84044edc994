// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Plan name is empty or invalid.
    InvalidName(String),
    /// Guest name is empty or invalid.
    InvalidGuestName(String),
    /// Plan mode string is not recognized.
    InvalidMode(String),
    /// The plan date range is inverted.
    InvalidDateRange {
        /// The start of the range.
        start: time::Date,
        /// The end of the range.
        end: time::Date,
    },
    /// A date falls outside the plan's range.
    DateOutOfRange {
        /// The offending date.
        date: time::Date,
    },
    /// A date is not among the planner's offered dates.
    DateNotOffered {
        /// The offending date.
        date: time::Date,
    },
    /// A response selected no dates.
    EmptySelection,
    /// A selected date has no guest time windows in a date-and-time plan.
    MissingTimeWindows {
        /// The day key of the selected date.
        date_key: String,
    },
    /// A time window is malformed (unparseable clock or start >= end).
    InvalidTimeWindow {
        /// The window start as submitted.
        start: String,
        /// The window end as submitted.
        end: String,
    },
    /// A time-window map key is not a valid calendar day key.
    InvalidDayKey(String),
    /// The desired duration is not a positive number of minutes.
    InvalidDesiredDuration(i64),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid plan name: {msg}"),
            Self::InvalidGuestName(msg) => write!(f, "Invalid guest name: {msg}"),
            Self::InvalidMode(mode) => write!(f, "Unknown plan mode: '{mode}'"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "Plan range is inverted: {start} is after {end}")
            }
            Self::DateOutOfRange { date } => {
                write!(f, "Date {date} falls outside the plan's range")
            }
            Self::DateNotOffered { date } => {
                write!(f, "Date {date} is not among the planner's offered dates")
            }
            Self::EmptySelection => write!(f, "At least one date must be selected"),
            Self::MissingTimeWindows { date_key } => {
                write!(
                    f,
                    "Selected date {date_key} requires at least one time window"
                )
            }
            Self::InvalidTimeWindow { start, end } => {
                write!(
                    f,
                    "Invalid time window: '{start}'..'{end}' (expected HH:mm with start before end)"
                )
            }
            Self::InvalidDayKey(key) => {
                write!(f, "Invalid day key: '{key}' (expected YYYY-MM-DD)")
            }
            Self::InvalidDesiredDuration(minutes) => {
                write!(
                    f,
                    "Invalid desired duration: {minutes} (must be a positive number of minutes)"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
