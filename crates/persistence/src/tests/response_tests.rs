// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_plan, create_test_response, test_date};
use crate::{Persistence, PersistenceError};
use muster_domain::{Response, TimeWindow};
use std::collections::BTreeMap;

#[test]
fn insert_and_fetch_response() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let plan_id: i64 = persistence
        .insert_plan(&create_test_plan("respplan01"))
        .expect("insert plan");
    let response_id: i64 = persistence
        .insert_response(&create_test_response(plan_id, "Sam"))
        .expect("insert response");
    assert!(response_id > 0);

    let fetched: Response = persistence.get_response(response_id).expect("fetch");
    assert_eq!(fetched.response_id, Some(response_id));
    assert_eq!(fetched.plan_id, plan_id);
    assert_eq!(fetched.guest_name, "Sam");
    assert_eq!(fetched.selected_dates, vec![test_date(2), test_date(3)]);
    assert_eq!(fetched.comment.as_deref(), Some("Either day works"));
    assert_eq!(fetched.selected_time_windows, None);
}

#[test]
fn guest_windows_round_trip() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let plan_id: i64 = persistence
        .insert_plan(&create_test_plan("respplan02"))
        .expect("insert plan");

    let mut windows: BTreeMap<String, Vec<TimeWindow>> = BTreeMap::new();
    windows.insert(
        String::from("2026-06-02"),
        vec![TimeWindow::new("10:00", "11:30").expect("Valid test window")],
    );
    let response: Response = Response::new(
        plan_id,
        String::from("Robin"),
        vec![test_date(2)],
        None,
        Some(windows),
    );
    let response_id: i64 = persistence
        .insert_response(&response)
        .expect("insert response");

    let fetched: Response = persistence.get_response(response_id).expect("fetch");
    let fetched_windows = fetched.windows_for("2026-06-02").expect("windows present");
    assert_eq!(fetched_windows.len(), 1);
    assert_eq!(fetched_windows[0].start, "10:00");
    assert_eq!(fetched_windows[0].end, "11:30");
}

#[test]
fn responses_list_in_submission_order() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let plan_id: i64 = persistence
        .insert_plan(&create_test_plan("orderplan1"))
        .expect("insert plan");

    for name in ["First", "Second", "Third"] {
        persistence
            .insert_response(&create_test_response(plan_id, name))
            .expect("insert response");
    }

    let responses: Vec<Response> = persistence
        .list_responses_for_plan(plan_id)
        .expect("list responses");
    let names: Vec<&str> = responses.iter().map(|r| r.guest_name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[test]
fn response_count_tracks_inserts_and_deletes() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let plan_id: i64 = persistence
        .insert_plan(&create_test_plan("countplan1"))
        .expect("insert plan");
    assert_eq!(
        persistence
            .count_responses_for_plan(plan_id)
            .expect("count"),
        0
    );

    let response_id: i64 = persistence
        .insert_response(&create_test_response(plan_id, "Sam"))
        .expect("insert response");
    assert_eq!(
        persistence
            .count_responses_for_plan(plan_id)
            .expect("count"),
        1
    );

    persistence
        .delete_response(response_id)
        .expect("delete response");
    assert_eq!(
        persistence
            .count_responses_for_plan(plan_id)
            .expect("count"),
        0
    );
}

#[test]
fn inserting_against_a_missing_plan_fails() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let result = persistence.insert_response(&create_test_response(999, "Ghost"));
    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}

#[test]
fn deleting_a_missing_response_fails() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let result = persistence.delete_response(42);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
