// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod response_tests;

use muster_domain::{Plan, PlanMode, Response, TimeWindow};
use std::collections::BTreeMap;
use time::{Date, Month};

pub fn test_date(day: u8) -> Date {
    Date::from_calendar_date(2026, Month::June, day).expect("Valid test date")
}

pub fn create_test_plan(slug: &str) -> Plan {
    Plan::new(
        slug.to_string(),
        String::from("Team offsite"),
        Some(String::from("Three days somewhere quiet")),
        test_date(1),
        test_date(7),
        PlanMode::RangeOnly,
        Vec::new(),
        None,
        None,
        String::from("owner-1"),
        Some(String::from("Alex")),
    )
}

pub fn create_timed_plan(slug: &str) -> Plan {
    let mut windows: BTreeMap<String, Vec<TimeWindow>> = BTreeMap::new();
    windows.insert(
        String::from("2026-06-02"),
        vec![TimeWindow::new("09:00", "12:00").expect("Valid test window")],
    );
    Plan::new(
        slug.to_string(),
        String::from("Design review"),
        None,
        test_date(1),
        test_date(7),
        PlanMode::DateAndTime,
        vec![test_date(2), test_date(3)],
        Some(windows),
        Some(60),
        String::from("owner-1"),
        Some(String::from("Alex")),
    )
}

pub fn create_test_response(plan_id: i64, guest_name: &str) -> Response {
    Response::new(
        plan_id,
        guest_name.to_string(),
        vec![test_date(2), test_date(3)],
        Some(String::from("Either day works")),
        None,
    )
}
