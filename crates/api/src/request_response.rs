// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross this boundary as canonical `YYYY-MM-DD` day keys, never as
//! typed dates; the handlers parse and format at the edge.

use muster_domain::{Plan, Response, TimeWindow, day_key};
use std::collections::BTreeMap;

/// API request to register a new owner account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOwnerRequest {
    /// The unique login name.
    pub login_name: String,
    /// The display name shown to guests.
    pub display_name: String,
    /// The password.
    pub password: String,
    /// The password confirmation.
    pub confirmation: String,
}

/// API response for a successful owner registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterOwnerResponse {
    /// The canonical owner identifier.
    pub owner_id: i64,
    /// The login name.
    pub login_name: String,
    /// The display name.
    pub display_name: String,
    /// A success message.
    pub message: String,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// The owner login name.
    pub login_name: String,
    /// The password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The opaque bearer token for subsequent requests.
    pub session_token: String,
    /// The login name.
    pub login_name: String,
    /// The display name.
    pub display_name: String,
    /// The session expiry timestamp (ISO 8601).
    pub expires_at: String,
}

/// API response describing the authenticated owner.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WhoAmIResponse {
    /// The login name.
    pub login_name: String,
    /// The display name.
    pub display_name: String,
}

/// API request to create a new plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlanRequest {
    /// The plan display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// First candidate day (inclusive), as a day key.
    pub start_date: String,
    /// Last candidate day (inclusive), as a day key.
    pub end_date: String,
    /// The plan mode wire string. Unrecognized values fall back to the
    /// range-only mode rather than failing.
    pub mode: String,
    /// Planner-curated dates, as day keys.
    pub available_dates: Vec<String>,
    /// Planner reference windows keyed by day key.
    pub time_windows: Option<BTreeMap<String, Vec<TimeWindow>>>,
    /// Advisory meeting length in minutes.
    pub desired_duration: Option<u32>,
}

/// API response for a successful plan creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreatePlanResponse {
    /// The canonical plan identifier.
    pub plan_id: i64,
    /// The share slug guests use to reach the plan.
    pub slug: String,
    /// A success message.
    pub message: String,
}

/// Public view of a plan.
///
/// This is what guests see; it deliberately omits `creator_id`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlanInfo {
    /// The share slug.
    pub slug: String,
    /// The plan display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// First candidate day (inclusive), as a day key.
    pub start_date: String,
    /// Last candidate day (inclusive), as a day key.
    pub end_date: String,
    /// The plan mode wire string.
    pub mode: String,
    /// Planner-curated dates, as day keys.
    pub available_dates: Vec<String>,
    /// Planner reference windows keyed by day key.
    pub time_windows: Option<BTreeMap<String, Vec<TimeWindow>>>,
    /// Advisory meeting length in minutes.
    pub desired_duration: Option<u32>,
    /// Display name of the plan creator, if known.
    pub creator_name: Option<String>,
}

impl PlanInfo {
    /// Builds the public view from a domain plan.
    #[must_use]
    pub fn from_plan(plan: &Plan) -> Self {
        Self {
            slug: plan.slug.clone(),
            name: plan.name.clone(),
            description: plan.description.clone(),
            start_date: day_key(plan.start_date),
            end_date: day_key(plan.end_date),
            mode: plan.mode.as_str().to_string(),
            available_dates: plan.available_dates.iter().map(|d| day_key(*d)).collect(),
            time_windows: plan.time_windows.clone(),
            desired_duration: plan.desired_duration,
            creator_name: plan.creator_name.clone(),
        }
    }
}

/// One entry in an owner's plan listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlanSummaryInfo {
    /// The share slug.
    pub slug: String,
    /// The plan display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// First candidate day (inclusive), as a day key.
    pub start_date: String,
    /// Last candidate day (inclusive), as a day key.
    pub end_date: String,
    /// The plan mode wire string.
    pub mode: String,
    /// Number of responses submitted so far.
    pub response_count: i64,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
}

/// API response listing an owner's plans, newest first.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListPlansResponse {
    /// The owner's plans.
    pub plans: Vec<PlanSummaryInfo>,
}

/// API response for a successful plan deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeletePlanResponse {
    /// The deleted plan's slug.
    pub slug: String,
    /// A success message.
    pub message: String,
}

/// API request for a guest to submit availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponseRequest {
    /// The guest's display name.
    pub guest_name: String,
    /// The days the guest is available, as day keys.
    pub selected_dates: Vec<String>,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// Guest time windows keyed by day key; required per selected date for
    /// date-and-time plans.
    pub selected_time_windows: Option<BTreeMap<String, Vec<TimeWindow>>>,
}

/// API response for a successful response submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmitResponseResponse {
    /// The canonical response identifier.
    pub response_id: i64,
    /// A success message.
    pub message: String,
}

/// One guest response, as shown to the plan owner.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResponseInfo {
    /// The canonical response identifier.
    pub response_id: i64,
    /// The guest's display name.
    pub guest_name: String,
    /// The days the guest is available, as day keys.
    pub selected_dates: Vec<String>,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// Guest time windows keyed by day key.
    pub selected_time_windows: Option<BTreeMap<String, Vec<TimeWindow>>>,
}

impl ResponseInfo {
    /// Builds the owner-facing view from a domain response.
    #[must_use]
    pub fn from_response(response: &Response) -> Self {
        Self {
            response_id: response.response_id.unwrap_or(0),
            guest_name: response.guest_name.clone(),
            selected_dates: response.selected_dates.iter().map(|d| day_key(*d)).collect(),
            comment: response.comment.clone(),
            selected_time_windows: response.selected_time_windows.clone(),
        }
    }
}

/// API response for a successful response deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteResponseResponse {
    /// The deleted response's identifier.
    pub response_id: i64,
    /// A success message.
    pub message: String,
}

/// Per-day participation with its color tier.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DayAvailabilityInfo {
    /// The calendar day, as a day key.
    pub date: String,
    /// Number of distinct responses that selected this day.
    pub count: usize,
    /// Guest names contributing to `count`, in submission order.
    pub names: Vec<String>,
    /// Color tier level `1..=5`, absent for days nobody selected.
    pub tier: Option<u8>,
}

/// API response for the owner-only results view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlanResultsResponse {
    /// The plan being summarized.
    pub plan: PlanInfo,
    /// All responses in submission order.
    pub responses: Vec<ResponseInfo>,
    /// Per-day participation across the full date range.
    pub days: Vec<DayAvailabilityInfo>,
    /// The maximum day count observed, floored at 1.
    pub max_count: usize,
}

/// Participation for one 15-minute block.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeBlockInfo {
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
    /// Guest names contributing to `count`.
    pub names: Vec<String>,
    /// Color tier level `1..=5`, absent for blocks nobody overlaps.
    pub tier: Option<u8>,
}

/// API response for the per-day time grid view.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeGridResponse {
    /// The day the grid covers, as a day key.
    pub date: String,
    /// All 96 blocks in ascending order.
    pub blocks: Vec<TimeBlockInfo>,
    /// The maximum block count within this day, floored at 1.
    pub max_count: usize,
}
