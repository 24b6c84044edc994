// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Submission-time validation for plans and responses.
//!
//! The aggregators are total over well-formed input and do not re-validate;
//! these functions are the upstream guard. A submission that fails here is
//! rejected before anything reaches storage.

use crate::day_key::{day_key, parse_day_key};
use crate::error::DomainError;
use crate::types::{Plan, Response, TimeWindow};

/// Validates a window list attached to one day key.
fn validate_window_list(windows: &[TimeWindow]) -> Result<(), DomainError> {
    for window in windows {
        if window.minutes().is_none() {
            return Err(DomainError::InvalidTimeWindow {
                start: window.start.clone(),
                end: window.end.clone(),
            });
        }
    }
    Ok(())
}

/// Validates a plan before it is persisted.
///
/// Checks the name, the date range orientation, that offered dates and
/// window keys fall inside the range, that every window list is non-empty
/// and well-formed, and that a desired duration (advisory only) is positive.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn validate_plan(plan: &Plan) -> Result<(), DomainError> {
    if plan.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Plan name cannot be empty",
        )));
    }

    if plan.start_date > plan.end_date {
        return Err(DomainError::InvalidDateRange {
            start: plan.start_date,
            end: plan.end_date,
        });
    }

    for date in &plan.available_dates {
        if !plan.contains(*date) {
            return Err(DomainError::DateOutOfRange { date: *date });
        }
    }

    if let Some(window_map) = &plan.time_windows {
        for (key, windows) in window_map {
            let date: time::Date =
                parse_day_key(key).map_err(|_| DomainError::InvalidDayKey(key.clone()))?;
            if !plan.contains(date) {
                return Err(DomainError::DateOutOfRange { date });
            }
            if windows.is_empty() {
                return Err(DomainError::MissingTimeWindows {
                    date_key: key.clone(),
                });
            }
            validate_window_list(windows)?;
        }
    }

    if let Some(duration) = plan.desired_duration
        && duration == 0
    {
        return Err(DomainError::InvalidDesiredDuration(0));
    }

    Ok(())
}

/// Validates a guest response against its plan before it is persisted.
///
/// Enforces the §3 invariants: non-empty guest name, at least one selected
/// date, every selected date inside the plan range and (when the mode
/// narrows choice) among the offered dates, and — for date-and-time plans —
/// at least one well-formed window per selected date.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn validate_response(plan: &Plan, response: &Response) -> Result<(), DomainError> {
    if response.guest_name.trim().is_empty() {
        return Err(DomainError::InvalidGuestName(String::from(
            "Guest name cannot be empty",
        )));
    }

    if response.selected_dates.is_empty() {
        return Err(DomainError::EmptySelection);
    }

    for date in &response.selected_dates {
        if !plan.contains(*date) {
            return Err(DomainError::DateOutOfRange { date: *date });
        }
        if plan.mode.narrows_dates() && !plan.available_dates.contains(date) {
            return Err(DomainError::DateNotOffered { date: *date });
        }
    }

    if plan.mode.requires_time_windows() {
        for date in &response.selected_dates {
            let key: String = day_key(*date);
            let windows: &[TimeWindow] = response
                .windows_for(&key)
                .ok_or_else(|| DomainError::MissingTimeWindows {
                    date_key: key.clone(),
                })?;
            if windows.is_empty() {
                return Err(DomainError::MissingTimeWindows { date_key: key });
            }
            validate_window_list(windows)?;
        }
    }

    Ok(())
}
