// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod day_key;
mod error;
mod heatmap;
mod time_grid;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use day_key::{day_key, days_between, parse_clock, parse_day_key};
pub use error::DomainError;
pub use heatmap::{DayAvailability, DayHeatmap, HeatTier};
pub use time_grid::{BLOCK_MINUTES, BLOCKS_PER_DAY, GuestWindows, TimeBlock, TimeGrid};
pub use types::{Plan, PlanMode, Response, TimeWindow};
pub use validation::{validate_plan, validate_response};
