// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{range_plan_request, register_and_login, setup, simple_submission};
use crate::error::ApiError;
use crate::handlers;

#[test]
fn only_the_creator_may_update_the_description() {
    let (mut persistence, owner) = setup();
    let intruder = register_and_login(&mut persistence, "robin", "Robin");

    let created = handlers::create_plan(&mut persistence, &range_plan_request("Mine"), &owner)
        .expect("create plan");

    let result = handlers::update_plan_description(
        &mut persistence,
        &created.slug,
        Some("Hijacked"),
        &intruder,
    );
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn only_the_creator_may_delete_the_plan() {
    let (mut persistence, owner) = setup();
    let intruder = register_and_login(&mut persistence, "robin", "Robin");

    let created = handlers::create_plan(&mut persistence, &range_plan_request("Mine"), &owner)
        .expect("create plan");

    let result = handlers::delete_plan(&mut persistence, &created.slug, &intruder);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));

    // The plan survives the failed attempt.
    handlers::fetch_plan(&mut persistence, &created.slug).expect("plan still exists");
}

#[test]
fn only_the_creator_may_see_results() {
    let (mut persistence, owner) = setup();
    let intruder = register_and_login(&mut persistence, "robin", "Robin");

    let created = handlers::create_plan(&mut persistence, &range_plan_request("Mine"), &owner)
        .expect("create plan");

    let result = handlers::fetch_results(&mut persistence, &created.slug, &intruder);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));

    let result = handlers::fetch_time_grid(&mut persistence, &created.slug, "2026-06-02", &intruder);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn only_the_creator_may_delete_responses() {
    let (mut persistence, owner) = setup();
    let intruder = register_and_login(&mut persistence, "robin", "Robin");

    let created = handlers::create_plan(&mut persistence, &range_plan_request("Mine"), &owner)
        .expect("create plan");
    let submitted =
        handlers::submit_response(&mut persistence, &created.slug, &simple_submission("Sam"))
            .expect("submit response");

    let result = handlers::delete_response(
        &mut persistence,
        &created.slug,
        submitted.response_id,
        &intruder,
    );
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn listings_never_mix_owners() {
    let (mut persistence, owner) = setup();
    let other = register_and_login(&mut persistence, "robin", "Robin");

    handlers::create_plan(&mut persistence, &range_plan_request("Mine"), &owner)
        .expect("create plan");

    let listing = handlers::list_plans(&mut persistence, &other).expect("list plans");
    assert!(listing.plans.is_empty());
}
