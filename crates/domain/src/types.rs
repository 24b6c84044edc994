// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::day_key::parse_clock;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::Date;

/// How guests may narrow their availability within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PlanMode {
    /// Guests may pick any day inside the plan's range.
    #[default]
    #[serde(rename = "DATE_RANGE")]
    RangeOnly,
    /// Guests pick only from the planner's curated dates.
    #[serde(rename = "DATE_SELECTION")]
    DateSubset,
    /// Guests pick dates and per-day time windows.
    #[serde(rename = "DATE_TIME_SELECTION")]
    DateAndTime,
}

impl FromStr for PlanMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DATE_RANGE" => Ok(Self::RangeOnly),
            "DATE_SELECTION" => Ok(Self::DateSubset),
            "DATE_TIME_SELECTION" => Ok(Self::DateAndTime),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for PlanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PlanMode {
    /// Converts this mode to its canonical wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RangeOnly => "DATE_RANGE",
            Self::DateSubset => "DATE_SELECTION",
            Self::DateAndTime => "DATE_TIME_SELECTION",
        }
    }

    /// Returns whether guest choice is narrowed to the planner's offered dates.
    #[must_use]
    pub const fn narrows_dates(&self) -> bool {
        matches!(self, Self::DateSubset | Self::DateAndTime)
    }

    /// Returns whether responses must carry per-day time windows.
    #[must_use]
    pub const fn requires_time_windows(&self) -> bool {
        matches!(self, Self::DateAndTime)
    }
}

/// A clock interval within one calendar day, stored as `HH:mm` strings.
///
/// The invariant `start < end` holds for every window produced by
/// [`TimeWindow::new`]; lexicographic comparison is valid for the zero-padded
/// 24-hour format. Windows in one list may overlap — no merging is performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Window start, e.g. `"09:00"`.
    pub start: String,
    /// Window end, e.g. `"17:30"`.
    pub end: String,
}

impl TimeWindow {
    /// Creates a validated `TimeWindow`.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is not a parseable clock time or if
    /// `start >= end`.
    pub fn new(start: &str, end: &str) -> Result<Self, DomainError> {
        let window: Self = Self {
            start: start.to_string(),
            end: end.to_string(),
        };
        if window.minutes().is_none() {
            return Err(DomainError::InvalidTimeWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(window)
    }

    /// Returns `(start, end)` as minutes past midnight, or `None` if either
    /// bound is unparseable or the window is empty/inverted.
    #[must_use]
    pub fn minutes(&self) -> Option<(u16, u16)> {
        let start: u16 = parse_clock(&self.start)?;
        let end: u16 = parse_clock(&self.end)?;
        if start < end { Some((start, end)) } else { None }
    }
}

/// A scheduling poll created by an owner.
///
/// The date range is inclusive at both ends and time-zone-naive: dates are
/// compared by calendar day, never by instant. `time_windows` is a sparse map
/// keyed by canonical day keys; only days the planner actually constrained
/// have an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the plan has not been persisted yet.
    pub plan_id: Option<i64>,
    /// URL-safe share slug, unique across all plans.
    pub slug: String,
    /// Display name of the plan.
    pub name: String,
    /// Optional description. The only field mutable after creation.
    pub description: Option<String>,
    /// First candidate day (inclusive).
    pub start_date: Date,
    /// Last candidate day (inclusive).
    pub end_date: Date,
    /// How guests may narrow their availability.
    pub mode: PlanMode,
    /// Planner-curated dates; consulted only when `mode` narrows choice.
    pub available_dates: Vec<Date>,
    /// Planner reference windows per day key; only for `DateAndTime` plans.
    pub time_windows: Option<BTreeMap<String, Vec<TimeWindow>>>,
    /// Advisory meeting length in minutes. Never enforced.
    pub desired_duration: Option<u32>,
    /// Identity of the owning user.
    pub creator_id: String,
    /// Display name of the owner, if known at creation time.
    pub creator_name: Option<String>,
}

impl Plan {
    /// Creates a new `Plan` without a persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        slug: String,
        name: String,
        description: Option<String>,
        start_date: Date,
        end_date: Date,
        mode: PlanMode,
        available_dates: Vec<Date>,
        time_windows: Option<BTreeMap<String, Vec<TimeWindow>>>,
        desired_duration: Option<u32>,
        creator_id: String,
        creator_name: Option<String>,
    ) -> Self {
        Self {
            plan_id: None,
            slug,
            name,
            description,
            start_date,
            end_date,
            mode,
            available_dates,
            time_windows,
            desired_duration,
            creator_id,
            creator_name,
        }
    }

    /// Returns whether `date` lies inside the inclusive plan range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns the planner reference windows for a day key, if any.
    #[must_use]
    pub fn planner_windows(&self, date_key: &str) -> &[TimeWindow] {
        self.time_windows
            .as_ref()
            .and_then(|map| map.get(date_key))
            .map_or(&[], Vec::as_slice)
    }
}

/// One guest's submitted availability against a plan.
///
/// Responses are created once and never edited; the plan owner may delete
/// them. `selected_time_windows` is a sparse day-key map present only for
/// `DateAndTime` plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Canonical identifier assigned by the database.
    /// `None` indicates the response has not been persisted yet.
    pub response_id: Option<i64>,
    /// The plan this response belongs to.
    pub plan_id: i64,
    /// Guest-supplied display name. Never empty after validation.
    pub guest_name: String,
    /// The days the guest is available, in submission order.
    pub selected_dates: Vec<Date>,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// Guest time windows per day key; only for `DateAndTime` plans.
    pub selected_time_windows: Option<BTreeMap<String, Vec<TimeWindow>>>,
}

impl Response {
    /// Creates a new `Response` without a persisted ID.
    #[must_use]
    pub const fn new(
        plan_id: i64,
        guest_name: String,
        selected_dates: Vec<Date>,
        comment: Option<String>,
        selected_time_windows: Option<BTreeMap<String, Vec<TimeWindow>>>,
    ) -> Self {
        Self {
            response_id: None,
            plan_id,
            guest_name,
            selected_dates,
            comment,
            selected_time_windows,
        }
    }

    /// Returns the guest's windows for a day key, if any were submitted.
    #[must_use]
    pub fn windows_for(&self, date_key: &str) -> Option<&[TimeWindow]> {
        self.selected_time_windows
            .as_ref()
            .and_then(|map| map.get(date_key))
            .map(Vec::as_slice)
    }
}
