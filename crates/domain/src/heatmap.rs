// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day-level availability aggregation.
//!
//! This module provides read-only aggregation of guest responses into
//! per-day participation counts and the five-tier color quantization the
//! results page renders. The aggregation is a pure function of its inputs
//! and is recomputed from a consistent snapshot on every read.

use crate::day_key::days_between;
use crate::types::Response;
use serde::{Deserialize, Serialize};
use time::Date;

/// One of five discrete heat intensities derived from a participation ratio.
///
/// The rendering layer maps tiers to colors; the thresholds and their
/// evaluation order are a contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeatTier {
    /// Ratio below 0.2.
    Lowest,
    /// Ratio in `[0.2, 0.4)`.
    Low,
    /// Ratio in `[0.4, 0.6)`.
    Medium,
    /// Ratio in `[0.6, 0.8)`.
    High,
    /// Ratio of 0.8 or above.
    Highest,
}

impl HeatTier {
    /// Quantizes a participation count against the aggregation maximum.
    ///
    /// Returns `None` for a count of zero (no color). Thresholds are
    /// evaluated highest first; the first match wins.
    #[must_use]
    pub fn from_counts(count: usize, max_count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio: f64 = count as f64 / max_count.max(1) as f64;
        if ratio >= 0.8 {
            Some(Self::Highest)
        } else if ratio >= 0.6 {
            Some(Self::High)
        } else if ratio >= 0.4 {
            Some(Self::Medium)
        } else if ratio >= 0.2 {
            Some(Self::Low)
        } else {
            Some(Self::Lowest)
        }
    }

    /// Returns the tier level, 1 (lowest intensity) through 5 (highest).
    #[must_use]
    pub const fn level(&self) -> u8 {
        match self {
            Self::Lowest => 1,
            Self::Low => 2,
            Self::Medium => 3,
            Self::High => 4,
            Self::Highest => 5,
        }
    }
}

/// Participation for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    /// The calendar day.
    pub date: Date,
    /// Number of distinct responses that selected this day.
    pub count: usize,
    /// Guest names contributing to `count`, in response iteration order.
    pub names: Vec<String>,
}

/// Per-day participation across a plan's full date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHeatmap {
    days: Vec<DayAvailability>,
    max_count: usize,
}

impl DayHeatmap {
    /// Aggregates responses over the inclusive day range `[start, end]`.
    ///
    /// Every day of the range appears exactly once, ascending, regardless of
    /// response activity. A response contributes to a day iff its selected
    /// dates contain that day; names follow the iteration order of
    /// `responses`. Days outside the range are never emitted — out-of-range
    /// selected dates are not filtered, they simply never match.
    #[must_use]
    pub fn build(start: Date, end: Date, responses: &[Response]) -> Self {
        let days: Vec<DayAvailability> = days_between(start, end)
            .into_iter()
            .map(|day| {
                let names: Vec<String> = responses
                    .iter()
                    .filter(|r| r.selected_dates.contains(&day))
                    .map(|r| r.guest_name.clone())
                    .collect();
                DayAvailability {
                    date: day,
                    count: names.len(),
                    names,
                }
            })
            .collect();

        // Floor of 1 avoids division by zero when there are no responses.
        let max_count: usize = days.iter().map(|d| d.count).max().unwrap_or(0).max(1);

        Self { days, max_count }
    }

    /// Returns the per-day entries, ascending by date.
    #[must_use]
    pub fn days(&self) -> &[DayAvailability] {
        &self.days
    }

    /// Returns the maximum day count observed, floored at 1.
    #[must_use]
    pub const fn max_count(&self) -> usize {
        self.max_count
    }

    /// Returns the color tier for one of this heatmap's days.
    #[must_use]
    pub fn tier_for(&self, day: &DayAvailability) -> Option<HeatTier> {
        HeatTier::from_counts(day.count, self.max_count)
    }
}
