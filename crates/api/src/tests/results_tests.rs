// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{range_plan_request, setup, simple_submission, timed_plan_request};
use crate::handlers;
use crate::request_response::SubmitResponseRequest;

#[test]
fn results_cover_every_day_of_the_range() {
    let (mut persistence, owner) = setup();

    let created = handlers::create_plan(&mut persistence, &range_plan_request("Week"), &owner)
        .expect("create plan");

    let results = handlers::fetch_results(&mut persistence, &created.slug, &owner)
        .expect("fetch results");
    assert_eq!(results.days.len(), 7);
    assert_eq!(results.days[0].date, "2026-06-01");
    assert_eq!(results.days[6].date, "2026-06-07");
    // No responses yet: every day is empty and uncolored, and the max
    // count floor keeps the denominator at 1.
    assert!(results.days.iter().all(|d| d.count == 0 && d.tier.is_none()));
    assert_eq!(results.max_count, 1);
}

#[test]
fn day_counts_and_names_follow_submission_order() {
    let (mut persistence, owner) = setup();

    let created = handlers::create_plan(&mut persistence, &range_plan_request("Week"), &owner)
        .expect("create plan");

    handlers::submit_response(&mut persistence, &created.slug, &simple_submission("Sam"))
        .expect("submit response");

    let mut second: SubmitResponseRequest = simple_submission("Robin");
    second.selected_dates = vec![String::from("2026-06-02")];
    handlers::submit_response(&mut persistence, &created.slug, &second)
        .expect("submit response");

    let results = handlers::fetch_results(&mut persistence, &created.slug, &owner)
        .expect("fetch results");

    let june_2 = &results.days[1];
    assert_eq!(june_2.date, "2026-06-02");
    assert_eq!(june_2.count, 2);
    assert_eq!(june_2.names, vec!["Sam", "Robin"]);
    assert_eq!(june_2.tier, Some(5));

    let june_3 = &results.days[2];
    assert_eq!(june_3.count, 1);
    assert_eq!(june_3.tier, Some(3));

    assert_eq!(results.max_count, 2);
    assert_eq!(results.responses.len(), 2);
    assert_eq!(results.responses[0].guest_name, "Sam");
    assert_eq!(results.responses[1].guest_name, "Robin");
}

#[test]
fn time_grid_distinguishes_reference_from_participation() {
    let (mut persistence, owner) = setup();

    // Planner window 09:00-12:00 on June 2.
    let created = handlers::create_plan(&mut persistence, &timed_plan_request("Timed"), &owner)
        .expect("create plan");

    // Guest window 11:50-12:30 overlaps the planner window's tail.
    let submission = super::helpers::timed_submission("Sam", "11:50", "12:30");
    handlers::submit_response(&mut persistence, &created.slug, &submission)
        .expect("submit response");

    let grid = handlers::fetch_time_grid(&mut persistence, &created.slug, "2026-06-02", &owner)
        .expect("fetch time grid");
    assert_eq!(grid.date, "2026-06-02");
    assert_eq!(grid.blocks.len(), 96);

    // 09:00 block (index 36) sits inside the planner window but the guest
    // does not overlap it.
    let morning = &grid.blocks[36];
    assert!(morning.in_planner_window);
    assert_eq!(morning.count, 0);
    assert_eq!(morning.tier, None);

    // 11:45 block (index 47): full containment in the planner window, and
    // the guest overlaps it from 11:50.
    let tail = &grid.blocks[47];
    assert!(tail.in_planner_window);
    assert_eq!(tail.count, 1);
    assert_eq!(tail.names, vec!["Sam"]);
    assert_eq!(tail.tier, Some(5));

    // 12:00 block (index 48) is outside the planner window, yet the guest
    // still participates: overlap, not containment, drives the count.
    let past_noon = &grid.blocks[48];
    assert!(!past_noon.in_planner_window);
    assert_eq!(past_noon.count, 1);

    assert_eq!(grid.max_count, 1);
}

#[test]
fn time_grid_is_empty_for_days_without_windows() {
    let (mut persistence, owner) = setup();

    let created = handlers::create_plan(&mut persistence, &timed_plan_request("Timed"), &owner)
        .expect("create plan");

    let grid = handlers::fetch_time_grid(&mut persistence, &created.slug, "2026-06-03", &owner)
        .expect("fetch time grid");
    assert_eq!(grid.blocks.len(), 96);
    assert!(grid.blocks.iter().all(|b| b.count == 0 && !b.in_planner_window));
    assert_eq!(grid.max_count, 1);
}
