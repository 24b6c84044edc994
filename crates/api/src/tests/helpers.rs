// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared test fixtures for the API layer.

use muster_domain::TimeWindow;
use muster_persistence::Persistence;
use std::collections::BTreeMap;

use crate::auth::{AuthenticatedOwner, AuthenticationService};
use crate::handlers;
use crate::request_response::{CreatePlanRequest, RegisterOwnerRequest, SubmitResponseRequest};

pub const TEST_PASSWORD: &str = "sturdy passw0rd";

/// Registers an owner and logs them in, returning the authenticated principal.
pub fn register_and_login(
    persistence: &mut Persistence,
    login_name: &str,
    display_name: &str,
) -> AuthenticatedOwner {
    handlers::register_owner(
        persistence,
        &RegisterOwnerRequest {
            login_name: login_name.to_string(),
            display_name: display_name.to_string(),
            password: TEST_PASSWORD.to_string(),
            confirmation: TEST_PASSWORD.to_string(),
        },
    )
    .expect("register owner");

    let (_token, owner) = AuthenticationService::login(persistence, login_name, TEST_PASSWORD)
        .expect("login");
    owner
}

/// A fresh in-memory database with one logged-in owner.
pub fn setup() -> (Persistence, AuthenticatedOwner) {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    let owner: AuthenticatedOwner = register_and_login(&mut persistence, "alex", "Alex");
    (persistence, owner)
}

/// A range-only plan request over June 1-7, 2026.
pub fn range_plan_request(name: &str) -> CreatePlanRequest {
    CreatePlanRequest {
        name: name.to_string(),
        description: Some(String::from("Pick the days that work")),
        start_date: String::from("2026-06-01"),
        end_date: String::from("2026-06-07"),
        mode: String::from("DATE_RANGE"),
        available_dates: Vec::new(),
        time_windows: None,
        desired_duration: None,
    }
}

/// A date-and-time plan request offering June 2 and 3 with one planner
/// window on June 2.
pub fn timed_plan_request(name: &str) -> CreatePlanRequest {
    let mut windows: BTreeMap<String, Vec<TimeWindow>> = BTreeMap::new();
    windows.insert(
        String::from("2026-06-02"),
        vec![TimeWindow::new("09:00", "12:00").expect("valid window")],
    );
    CreatePlanRequest {
        name: name.to_string(),
        description: None,
        start_date: String::from("2026-06-01"),
        end_date: String::from("2026-06-07"),
        mode: String::from("DATE_TIME_SELECTION"),
        available_dates: vec![String::from("2026-06-02"), String::from("2026-06-03")],
        time_windows: Some(windows),
        desired_duration: Some(60),
    }
}

/// A simple submission selecting June 2 and 3.
pub fn simple_submission(guest_name: &str) -> SubmitResponseRequest {
    SubmitResponseRequest {
        guest_name: guest_name.to_string(),
        selected_dates: vec![String::from("2026-06-02"), String::from("2026-06-03")],
        comment: None,
        selected_time_windows: None,
    }
}

/// A submission for a date-and-time plan with windows on each selected day.
pub fn timed_submission(guest_name: &str, start: &str, end: &str) -> SubmitResponseRequest {
    let mut windows: BTreeMap<String, Vec<TimeWindow>> = BTreeMap::new();
    windows.insert(
        String::from("2026-06-02"),
        vec![TimeWindow::new(start, end).expect("valid window")],
    );
    SubmitResponseRequest {
        guest_name: guest_name.to_string(),
        selected_dates: vec![String::from("2026-06-02")],
        comment: None,
        selected_time_windows: Some(windows),
    }
}
