// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    range_plan_request, setup, simple_submission, timed_plan_request, timed_submission,
};
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::SubmitResponseRequest;

#[test]
fn guests_can_respond_without_authentication() {
    let (mut persistence, owner) = setup();

    let created = handlers::create_plan(&mut persistence, &range_plan_request("Open"), &owner)
        .expect("create plan");

    let response =
        handlers::submit_response(&mut persistence, &created.slug, &simple_submission("Sam"))
            .expect("submit response");
    assert!(response.response_id > 0);
}

#[test]
fn empty_guest_names_are_rejected() {
    let (mut persistence, owner) = setup();

    let created = handlers::create_plan(&mut persistence, &range_plan_request("Open"), &owner)
        .expect("create plan");

    let mut submission: SubmitResponseRequest = simple_submission("  ");
    submission.guest_name = String::from("   ");
    let result = handlers::submit_response(&mut persistence, &created.slug, &submission);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "guest_name"
    ));
}

#[test]
fn empty_selections_are_rejected() {
    let (mut persistence, owner) = setup();

    let created = handlers::create_plan(&mut persistence, &range_plan_request("Open"), &owner)
        .expect("create plan");

    let mut submission: SubmitResponseRequest = simple_submission("Sam");
    submission.selected_dates = Vec::new();
    let result = handlers::submit_response(&mut persistence, &created.slug, &submission);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "selected_dates"
    ));
}

#[test]
fn selections_outside_the_range_are_rejected() {
    let (mut persistence, owner) = setup();

    let created = handlers::create_plan(&mut persistence, &range_plan_request("Open"), &owner)
        .expect("create plan");

    let mut submission: SubmitResponseRequest = simple_submission("Sam");
    submission.selected_dates = vec![String::from("2026-07-15")];
    let result = handlers::submit_response(&mut persistence, &created.slug, &submission);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "selected_dates"
    ));
}

#[test]
fn narrowed_plans_reject_unoffered_dates() {
    let (mut persistence, owner) = setup();

    // Offered dates are June 2 and 3; June 4 is in range but not offered.
    let created = handlers::create_plan(&mut persistence, &timed_plan_request("Narrow"), &owner)
        .expect("create plan");

    let mut submission: SubmitResponseRequest = timed_submission("Sam", "10:00", "11:00");
    submission.selected_dates = vec![String::from("2026-06-04")];
    let result = handlers::submit_response(&mut persistence, &created.slug, &submission);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "selected_dates"
    ));
}

#[test]
fn timed_plans_require_windows_per_selected_date() {
    let (mut persistence, owner) = setup();

    let created = handlers::create_plan(&mut persistence, &timed_plan_request("Timed"), &owner)
        .expect("create plan");

    let mut submission: SubmitResponseRequest = timed_submission("Sam", "10:00", "11:00");
    submission.selected_dates = vec![String::from("2026-06-02"), String::from("2026-06-03")];
    // Windows only cover June 2.
    let result = handlers::submit_response(&mut persistence, &created.slug, &submission);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "selected_time_windows"
    ));
}

#[test]
fn timed_plans_accept_complete_submissions() {
    let (mut persistence, owner) = setup();

    let created = handlers::create_plan(&mut persistence, &timed_plan_request("Timed"), &owner)
        .expect("create plan");

    let response = handlers::submit_response(
        &mut persistence,
        &created.slug,
        &timed_submission("Sam", "10:00", "11:00"),
    )
    .expect("submit response");
    assert!(response.response_id > 0);
}

#[test]
fn owners_can_delete_responses() {
    let (mut persistence, owner) = setup();

    let created = handlers::create_plan(&mut persistence, &range_plan_request("Open"), &owner)
        .expect("create plan");
    let submitted =
        handlers::submit_response(&mut persistence, &created.slug, &simple_submission("Sam"))
            .expect("submit response");

    handlers::delete_response(&mut persistence, &created.slug, submitted.response_id, &owner)
        .expect("delete response");

    let results = handlers::fetch_results(&mut persistence, &created.slug, &owner)
        .expect("fetch results");
    assert!(results.responses.is_empty());
}

#[test]
fn deleting_a_response_through_the_wrong_plan_fails() {
    let (mut persistence, owner) = setup();

    let first = handlers::create_plan(&mut persistence, &range_plan_request("First"), &owner)
        .expect("create plan");
    let second = handlers::create_plan(&mut persistence, &range_plan_request("Second"), &owner)
        .expect("create plan");
    let submitted =
        handlers::submit_response(&mut persistence, &first.slug, &simple_submission("Sam"))
            .expect("submit response");

    let result = handlers::delete_response(
        &mut persistence,
        &second.slug,
        submitted.response_id,
        &owner,
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
