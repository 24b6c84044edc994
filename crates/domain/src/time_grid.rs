// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Time-block availability aggregation for date-and-time plans.
//!
//! One calendar day is partitioned into fixed 15-minute blocks. For each
//! block the aggregation records whether the block sits fully inside a
//! planner reference window (a thin visual strip, never a filter) and which
//! guests overlap it at all. The two tests are intentionally different:
//! reference uses full containment, participation uses any overlap.

use crate::heatmap::HeatTier;
use crate::types::TimeWindow;
use serde::{Deserialize, Serialize};

/// Length of one block in minutes.
pub const BLOCK_MINUTES: u16 = 15;

/// Number of blocks in one day (96).
pub const BLOCKS_PER_DAY: usize = (24 * 60 / BLOCK_MINUTES) as usize;

/// One guest's submitted windows for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestWindows {
    /// The guest's display name.
    pub guest_name: String,
    /// The guest's windows for the day. May overlap each other.
    pub windows: Vec<TimeWindow>,
}

/// Participation for a single 15-minute block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Block index within the day, `0..96`.
    pub index: usize,
    /// Minutes past midnight at which the block starts (inclusive).
    pub start_minute: u16,
    /// Minutes past midnight at which the block ends (exclusive).
    pub end_minute: u16,
    /// Whether the block lies fully inside at least one planner window.
    pub in_planner_window: bool,
    /// Number of distinct guests overlapping the block.
    pub count: usize,
    /// Guest names contributing to `count`, in entry iteration order.
    pub names: Vec<String>,
}

/// The 96-block participation grid for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGrid {
    blocks: Vec<TimeBlock>,
    max_count: usize,
}

/// Returns whether `[start_minute, end_minute)` lies fully inside any window.
fn contained_in_any(start_minute: u16, end_minute: u16, windows: &[TimeWindow]) -> bool {
    windows.iter().any(|w| {
        w.minutes()
            .is_some_and(|(w_start, w_end)| start_minute >= w_start && end_minute <= w_end)
    })
}

/// Returns whether any window overlaps `[start_minute, end_minute)` at all.
fn overlaps_any(start_minute: u16, end_minute: u16, windows: &[TimeWindow]) -> bool {
    windows.iter().any(|w| {
        w.minutes()
            .is_some_and(|(w_start, w_end)| w_start < end_minute && w_end > start_minute)
    })
}

impl TimeGrid {
    /// Builds the full-day grid from planner reference windows and guest
    /// entries for one day.
    ///
    /// All 96 blocks are produced, unfiltered by the reference flag. A guest
    /// counts at most once per block even when several of their windows
    /// overlap it. Unparseable windows contribute nothing; validation keeps
    /// them out of storage in the first place.
    #[must_use]
    pub fn build(planner_windows: &[TimeWindow], guest_entries: &[GuestWindows]) -> Self {
        let blocks: Vec<TimeBlock> = (0..BLOCKS_PER_DAY)
            .map(|index| {
                #[allow(clippy::cast_possible_truncation)]
                let start_minute: u16 = index as u16 * BLOCK_MINUTES;
                let end_minute: u16 = start_minute + BLOCK_MINUTES;

                let names: Vec<String> = guest_entries
                    .iter()
                    .filter(|entry| overlaps_any(start_minute, end_minute, &entry.windows))
                    .map(|entry| entry.guest_name.clone())
                    .collect();

                TimeBlock {
                    index,
                    start_minute,
                    end_minute,
                    in_planner_window: contained_in_any(start_minute, end_minute, planner_windows),
                    count: names.len(),
                    names,
                }
            })
            .collect();

        // Independent per day: the floor of 1 mirrors the day-level heatmap.
        let max_count: usize = blocks.iter().map(|b| b.count).max().unwrap_or(0).max(1);

        Self { blocks, max_count }
    }

    /// Returns all 96 blocks in ascending order.
    #[must_use]
    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    /// Looks up a single block for detail display.
    #[must_use]
    pub fn block(&self, index: usize) -> Option<&TimeBlock> {
        self.blocks.get(index)
    }

    /// Returns the maximum block count within this day, floored at 1.
    #[must_use]
    pub const fn max_count(&self) -> usize {
        self.max_count
    }

    /// Returns the color tier for one of this grid's blocks.
    #[must_use]
    pub fn tier_for(&self, block: &TimeBlock) -> Option<HeatTier> {
        HeatTier::from_counts(block.count, self.max_count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> TimeWindow {
        TimeWindow::new(start, end).unwrap()
    }

    fn entry(guest_name: &str, windows: &[TimeWindow]) -> GuestWindows {
        GuestWindows {
            guest_name: guest_name.to_string(),
            windows: windows.to_vec(),
        }
    }

    /// Block index for a given clock time, e.g. `block_at(9, 15)` for
    /// the block starting 09:15.
    const fn block_at(hours: usize, minutes: usize) -> usize {
        (hours * 60 + minutes) / BLOCK_MINUTES as usize
    }

    #[test]
    fn test_grid_always_has_96_blocks() {
        let grid: TimeGrid = TimeGrid::build(&[], &[]);
        assert_eq!(grid.blocks().len(), BLOCKS_PER_DAY);
        assert_eq!(grid.blocks().len(), 96);
        assert_eq!(grid.max_count(), 1);
        assert!(grid.blocks().iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_partial_overlap_counts() {
        // 09:00-09:20 covers [09:00,09:15) and [09:15,09:30) but not
        // [08:45,09:00).
        let guests: Vec<GuestWindows> = vec![entry("Alice", &[window("09:00", "09:20")])];
        let grid: TimeGrid = TimeGrid::build(&[], &guests);

        assert_eq!(grid.block(block_at(9, 0)).unwrap().count, 1);
        assert_eq!(grid.block(block_at(9, 15)).unwrap().count, 1);
        assert_eq!(grid.block(block_at(8, 45)).unwrap().count, 0);
        assert_eq!(grid.block(block_at(9, 30)).unwrap().count, 0);
    }

    #[test]
    fn test_guest_counted_once_per_block() {
        // Two overlapping windows from the same guest both cover 09:00.
        let guests: Vec<GuestWindows> = vec![entry(
            "Alice",
            &[window("08:30", "09:30"), window("09:00", "10:00")],
        )];
        let grid: TimeGrid = TimeGrid::build(&[], &guests);

        let block: &TimeBlock = grid.block(block_at(9, 0)).unwrap();
        assert_eq!(block.count, 1);
        assert_eq!(block.names, vec!["Alice"]);
    }

    #[test]
    fn test_reference_containment_vs_participation_overlap() {
        // Planner 09:00-17:00, guest 08:00-10:00. The [08:45,09:00) block is
        // not fully inside the planner window but does overlap the guest's.
        let planner: Vec<TimeWindow> = vec![window("09:00", "17:00")];
        let guests: Vec<GuestWindows> = vec![entry("Alice", &[window("08:00", "10:00")])];
        let grid: TimeGrid = TimeGrid::build(&planner, &guests);

        let block: &TimeBlock = grid.block(block_at(8, 45)).unwrap();
        assert!(!block.in_planner_window);
        assert_eq!(block.count, 1);

        let inside: &TimeBlock = grid.block(block_at(9, 0)).unwrap();
        assert!(inside.in_planner_window);
    }

    #[test]
    fn test_reference_flag_never_filters_participation() {
        let planner: Vec<TimeWindow> = vec![window("09:00", "10:00")];
        let guests: Vec<GuestWindows> = vec![entry("Alice", &[window("20:00", "21:00")])];
        let grid: TimeGrid = TimeGrid::build(&planner, &guests);

        let evening: &TimeBlock = grid.block(block_at(20, 0)).unwrap();
        assert!(!evening.in_planner_window);
        assert_eq!(evening.count, 1);
    }

    #[test]
    fn test_morning_scenario() {
        // Planner 09:00-12:00; Alice 09:00-10:00, Bob 09:30-11:00.
        let planner: Vec<TimeWindow> = vec![window("09:00", "12:00")];
        let guests: Vec<GuestWindows> = vec![
            entry("Alice", &[window("09:00", "10:00")]),
            entry("Bob", &[window("09:30", "11:00")]),
        ];
        let grid: TimeGrid = TimeGrid::build(&planner, &guests);

        let shared: &TimeBlock = grid.block(block_at(9, 30)).unwrap();
        assert_eq!(shared.count, 2);
        assert_eq!(shared.names, vec!["Alice", "Bob"]);

        let late: &TimeBlock = grid.block(block_at(11, 0)).unwrap();
        assert_eq!(late.count, 0);
        assert!(late.names.is_empty());
        assert!(late.in_planner_window);
    }

    #[test]
    fn test_max_count_is_per_day() {
        let guests: Vec<GuestWindows> = vec![
            entry("Alice", &[window("09:00", "10:00")]),
            entry("Bob", &[window("09:00", "10:00")]),
            entry("Carol", &[window("09:00", "09:15")]),
        ];
        let grid: TimeGrid = TimeGrid::build(&[], &guests);

        assert_eq!(grid.max_count(), 3);
        let crowded: &TimeBlock = grid.block(block_at(9, 0)).unwrap();
        assert_eq!(grid.tier_for(crowded), Some(HeatTier::Highest));
        let pair: &TimeBlock = grid.block(block_at(9, 15)).unwrap();
        assert_eq!(pair.count, 2);
        // ratio 2/3 lands in the >= 0.6 bucket
        assert_eq!(grid.tier_for(pair), Some(HeatTier::High));
    }

    #[test]
    fn test_block_lookup_out_of_range() {
        let grid: TimeGrid = TimeGrid::build(&[], &[]);
        assert!(grid.block(BLOCKS_PER_DAY).is_none());
    }

    #[test]
    fn test_unparseable_window_contributes_nothing() {
        let guests: Vec<GuestWindows> = vec![GuestWindows {
            guest_name: String::from("Mallory"),
            windows: vec![TimeWindow {
                start: String::from("9am"),
                end: String::from("5pm"),
            }],
        }];
        let grid: TimeGrid = TimeGrid::build(&[], &guests);
        assert!(grid.blocks().iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_midnight_boundary_window() {
        let guests: Vec<GuestWindows> = vec![entry("Alice", &[window("23:45", "24:00")])];
        let grid: TimeGrid = TimeGrid::build(&[], &guests);

        assert_eq!(grid.block(BLOCKS_PER_DAY - 1).unwrap().count, 1);
        assert_eq!(grid.block(BLOCKS_PER_DAY - 2).unwrap().count, 0);
    }
}
