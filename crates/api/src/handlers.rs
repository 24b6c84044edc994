// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers own the boundary work: parsing day keys, running domain
//! validation, enforcing ownership, and translating errors. Aggregation
//! itself stays in the domain crate.

use std::str::FromStr;

use muster_domain::{
    DayHeatmap, GuestWindows, Plan, PlanMode, Response, TimeGrid, TimeWindow, day_key,
    parse_day_key, validate_plan, validate_response,
};
use muster_persistence::{Persistence, PlanSummary};
use time::Date;
use tracing::info;

use crate::auth::{AuthenticatedOwner, AuthenticationService, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    CreatePlanRequest, CreatePlanResponse, DayAvailabilityInfo, DeletePlanResponse,
    DeleteResponseResponse, ListPlansResponse, LoginRequest, LoginResponse, PlanInfo,
    PlanResultsResponse, PlanSummaryInfo, RegisterOwnerRequest, RegisterOwnerResponse,
    ResponseInfo, SubmitResponseRequest, SubmitResponseResponse, TimeBlockInfo, TimeGridResponse,
    WhoAmIResponse,
};
use crate::slug::generate_slug;

/// Maximum attempts to find an unused share slug before giving up.
const SLUG_ATTEMPTS: usize = 5;

/// Parses a wire day key, translating failures to API errors.
fn parse_wire_date(key: &str) -> Result<Date, ApiError> {
    parse_day_key(key).map_err(translate_domain_error)
}

/// Fetches a plan by slug, translating not-found to the API contract.
fn fetch_plan_by_slug(persistence: &mut Persistence, slug: &str) -> Result<Plan, ApiError> {
    persistence
        .get_plan_by_slug(slug)
        .map_err(|e| translate_persistence_error(e, "Plan"))
}

/// Registers a new owner account.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The registration request
///
/// # Errors
///
/// Returns an error if:
/// - The login or display name is empty
/// - The password violates the policy
/// - The login name is already taken
/// - Database operations fail
pub fn register_owner(
    persistence: &mut Persistence,
    request: &RegisterOwnerRequest,
) -> Result<RegisterOwnerResponse, ApiError> {
    let login_name: &str = request.login_name.trim();
    if login_name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("login_name"),
            message: String::from("Login name must not be empty"),
        });
    }

    let display_name: &str = request.display_name.trim();
    if display_name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("display_name"),
            message: String::from("Display name must not be empty"),
        });
    }

    PasswordPolicy::default().validate(&request.password, &request.confirmation, login_name)?;

    let taken: bool = persistence
        .owner_login_exists(login_name)
        .map_err(|e| translate_persistence_error(e, "Owner"))?;
    if taken {
        return Err(ApiError::InvalidInput {
            field: String::from("login_name"),
            message: format!("Login name '{login_name}' is already taken"),
        });
    }

    let owner_id: i64 = persistence
        .insert_owner(login_name, display_name, &request.password)
        .map_err(|e| translate_persistence_error(e, "Owner"))?;

    info!(owner_id, login_name, "Registered new owner");

    Ok(RegisterOwnerResponse {
        owner_id,
        login_name: login_name.to_string(),
        display_name: display_name.to_string(),
        message: format!("Owner '{login_name}' registered"),
    })
}

/// Authenticates an owner and creates a session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The login request
///
/// # Errors
///
/// Returns an error if the credentials are wrong or session creation fails.
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, owner): (String, AuthenticatedOwner) =
        AuthenticationService::login(persistence, &request.login_name, &request.password)?;

    let expires_at: String = persistence
        .get_session_by_token(&session_token)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to retrieve session: {e}"),
        })?
        .expires_at;

    Ok(LoginResponse {
        session_token,
        login_name: owner.login_name,
        display_name: owner.display_name,
        expires_at,
    })
}

/// Logs out by deleting the session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `session_token` - The session token to delete
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the authenticated owner's information.
#[must_use]
pub fn whoami(owner: &AuthenticatedOwner) -> WhoAmIResponse {
    WhoAmIResponse {
        login_name: owner.login_name.clone(),
        display_name: owner.display_name.clone(),
    }
}

/// Creates a new plan owned by the authenticated owner.
///
/// An unrecognized mode string falls back to the range-only mode rather
/// than failing; everything else is validated strictly.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The plan creation request
/// * `owner` - The authenticated owner
///
/// # Errors
///
/// Returns an error if validation fails or persistence fails.
pub fn create_plan(
    persistence: &mut Persistence,
    request: &CreatePlanRequest,
    owner: &AuthenticatedOwner,
) -> Result<CreatePlanResponse, ApiError> {
    let start_date: Date = parse_wire_date(&request.start_date)?;
    let end_date: Date = parse_wire_date(&request.end_date)?;

    let mode: PlanMode = PlanMode::from_str(&request.mode).unwrap_or_default();

    let available_dates: Vec<Date> = request
        .available_dates
        .iter()
        .map(|key| parse_wire_date(key))
        .collect::<Result<Vec<Date>, ApiError>>()?;

    let mut plan: Plan = Plan::new(
        String::new(),
        request.name.trim().to_string(),
        request.description.clone(),
        start_date,
        end_date,
        mode,
        available_dates,
        request.time_windows.clone(),
        request.desired_duration,
        owner.creator_id.clone(),
        Some(owner.display_name.clone()),
    );

    validate_plan(&plan).map_err(translate_domain_error)?;

    // Slugs are random; retry on the unlikely collision.
    let mut last_err: Option<ApiError> = None;
    for _ in 0..SLUG_ATTEMPTS {
        plan.slug = generate_slug();
        match persistence.insert_plan(&plan) {
            Ok(plan_id) => {
                info!(plan_id, slug = %plan.slug, "Created plan");
                return Ok(CreatePlanResponse {
                    plan_id,
                    slug: plan.slug,
                    message: String::from("Plan created"),
                });
            }
            Err(e) => {
                last_err = Some(translate_persistence_error(e, "Plan"));
            }
        }
    }

    Err(last_err.unwrap_or_else(|| ApiError::Internal {
        message: String::from("Failed to allocate a share slug"),
    }))
}

/// Fetches the public view of a plan by its share slug.
///
/// This operation requires no authentication: anyone holding the slug may
/// see the plan.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `slug` - The share slug
///
/// # Errors
///
/// Returns an error if the plan does not exist or the query fails.
pub fn fetch_plan(persistence: &mut Persistence, slug: &str) -> Result<PlanInfo, ApiError> {
    let plan: Plan = fetch_plan_by_slug(persistence, slug)?;
    Ok(PlanInfo::from_plan(&plan))
}

/// Lists the authenticated owner's plans, newest first, with response counts.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `owner` - The authenticated owner
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_plans(
    persistence: &mut Persistence,
    owner: &AuthenticatedOwner,
) -> Result<ListPlansResponse, ApiError> {
    let summaries: Vec<PlanSummary> = persistence
        .list_plans_for_creator(&owner.creator_id)
        .map_err(|e| translate_persistence_error(e, "Plan"))?;

    let plans: Vec<PlanSummaryInfo> = summaries
        .into_iter()
        .map(|summary| PlanSummaryInfo {
            slug: summary.plan.slug,
            name: summary.plan.name,
            description: summary.plan.description,
            start_date: day_key(summary.plan.start_date),
            end_date: day_key(summary.plan.end_date),
            mode: summary.plan.mode.as_str().to_string(),
            response_count: summary.response_count,
            created_at: summary.created_at,
        })
        .collect();

    Ok(ListPlansResponse { plans })
}

/// Updates a plan's description. Owner only.
///
/// The description is the only plan field mutable after creation.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `slug` - The share slug
/// * `description` - The new description; `None` clears it
/// * `owner` - The authenticated owner
///
/// # Errors
///
/// Returns an error if the plan does not exist, the owner does not own it,
/// or the update fails.
pub fn update_plan_description(
    persistence: &mut Persistence,
    slug: &str,
    description: Option<&str>,
    owner: &AuthenticatedOwner,
) -> Result<PlanInfo, ApiError> {
    let mut plan: Plan = fetch_plan_by_slug(persistence, slug)?;
    AuthorizationService::authorize_plan_owner(owner, &plan, "update_plan_description")?;

    let plan_id: i64 = plan.plan_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Fetched plan is missing its ID"),
    })?;

    persistence
        .update_plan_description(plan_id, description)
        .map_err(|e| translate_persistence_error(e, "Plan"))?;

    plan.description = description.map(ToString::to_string);
    Ok(PlanInfo::from_plan(&plan))
}

/// Deletes a plan and all of its responses. Owner only.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `slug` - The share slug
/// * `owner` - The authenticated owner
///
/// # Errors
///
/// Returns an error if the plan does not exist, the owner does not own it,
/// or the delete fails.
pub fn delete_plan(
    persistence: &mut Persistence,
    slug: &str,
    owner: &AuthenticatedOwner,
) -> Result<DeletePlanResponse, ApiError> {
    let plan: Plan = fetch_plan_by_slug(persistence, slug)?;
    AuthorizationService::authorize_plan_owner(owner, &plan, "delete_plan")?;

    let plan_id: i64 = plan.plan_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Fetched plan is missing its ID"),
    })?;

    persistence
        .delete_plan(plan_id)
        .map_err(|e| translate_persistence_error(e, "Plan"))?;

    info!(plan_id, slug, "Deleted plan");

    Ok(DeletePlanResponse {
        slug: slug.to_string(),
        message: String::from("Plan deleted"),
    })
}

/// Submits a guest response against a plan.
///
/// This operation requires no authentication: anyone holding the slug may
/// respond.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `slug` - The share slug
/// * `request` - The submission request
///
/// # Errors
///
/// Returns an error if the plan does not exist, validation fails, or the
/// insert fails.
pub fn submit_response(
    persistence: &mut Persistence,
    slug: &str,
    request: &SubmitResponseRequest,
) -> Result<SubmitResponseResponse, ApiError> {
    let plan: Plan = fetch_plan_by_slug(persistence, slug)?;

    let plan_id: i64 = plan.plan_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Fetched plan is missing its ID"),
    })?;

    let selected_dates: Vec<Date> = request
        .selected_dates
        .iter()
        .map(|key| parse_wire_date(key))
        .collect::<Result<Vec<Date>, ApiError>>()?;

    let response: Response = Response::new(
        plan_id,
        request.guest_name.trim().to_string(),
        selected_dates,
        request.comment.clone(),
        request.selected_time_windows.clone(),
    );

    validate_response(&plan, &response).map_err(translate_domain_error)?;

    let response_id: i64 = persistence
        .insert_response(&response)
        .map_err(|e| translate_persistence_error(e, "Response"))?;

    info!(response_id, slug, "Recorded guest response");

    Ok(SubmitResponseResponse {
        response_id,
        message: String::from("Response recorded"),
    })
}

/// Deletes a guest response. Owner of the plan only.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `slug` - The share slug of the plan the response belongs to
/// * `response_id` - The response to delete
/// * `owner` - The authenticated owner
///
/// # Errors
///
/// Returns an error if the plan or response does not exist, the response
/// belongs to a different plan, the owner does not own the plan, or the
/// delete fails.
pub fn delete_response(
    persistence: &mut Persistence,
    slug: &str,
    response_id: i64,
    owner: &AuthenticatedOwner,
) -> Result<DeleteResponseResponse, ApiError> {
    let plan: Plan = fetch_plan_by_slug(persistence, slug)?;
    AuthorizationService::authorize_plan_owner(owner, &plan, "delete_response")?;

    let response: Response = persistence
        .get_response(response_id)
        .map_err(|e| translate_persistence_error(e, "Response"))?;

    if Some(response.plan_id) != plan.plan_id {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Response"),
            message: format!("Response {response_id} does not belong to plan '{slug}'"),
        });
    }

    persistence
        .delete_response(response_id)
        .map_err(|e| translate_persistence_error(e, "Response"))?;

    Ok(DeleteResponseResponse {
        response_id,
        message: String::from("Response deleted"),
    })
}

/// Fetches the owner-only results view: all responses plus the day heatmap.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `slug` - The share slug
/// * `owner` - The authenticated owner
///
/// # Errors
///
/// Returns an error if the plan does not exist, the owner does not own it,
/// or queries fail.
pub fn fetch_results(
    persistence: &mut Persistence,
    slug: &str,
    owner: &AuthenticatedOwner,
) -> Result<PlanResultsResponse, ApiError> {
    let plan: Plan = fetch_plan_by_slug(persistence, slug)?;
    AuthorizationService::authorize_plan_owner(owner, &plan, "fetch_results")?;

    let plan_id: i64 = plan.plan_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Fetched plan is missing its ID"),
    })?;

    let responses: Vec<Response> = persistence
        .list_responses_for_plan(plan_id)
        .map_err(|e| translate_persistence_error(e, "Response"))?;

    let heatmap: DayHeatmap = DayHeatmap::build(plan.start_date, plan.end_date, &responses);
    let days: Vec<DayAvailabilityInfo> = heatmap
        .days()
        .iter()
        .map(|day| DayAvailabilityInfo {
            date: day_key(day.date),
            count: day.count,
            names: day.names.clone(),
            tier: heatmap.tier_for(day).map(|t| t.level()),
        })
        .collect();

    Ok(PlanResultsResponse {
        plan: PlanInfo::from_plan(&plan),
        responses: responses.iter().map(ResponseInfo::from_response).collect(),
        days,
        max_count: heatmap.max_count(),
    })
}

/// Fetches the 96-block time grid for one day of a plan. Owner only.
///
/// The grid is only meaningful for date-and-time plans, but it is
/// well-defined for any plan: without windows every block is simply empty.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `slug` - The share slug
/// * `date` - The day to aggregate, as a day key
/// * `owner` - The authenticated owner
///
/// # Errors
///
/// Returns an error if the plan does not exist, the owner does not own it,
/// the day key is malformed, or queries fail.
pub fn fetch_time_grid(
    persistence: &mut Persistence,
    slug: &str,
    date: &str,
    owner: &AuthenticatedOwner,
) -> Result<TimeGridResponse, ApiError> {
    let plan: Plan = fetch_plan_by_slug(persistence, slug)?;
    AuthorizationService::authorize_plan_owner(owner, &plan, "fetch_time_grid")?;

    // Normalize the key so lookups match stored map keys exactly.
    let date_key: String = day_key(parse_wire_date(date)?);

    let plan_id: i64 = plan.plan_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Fetched plan is missing its ID"),
    })?;

    let responses: Vec<Response> = persistence
        .list_responses_for_plan(plan_id)
        .map_err(|e| translate_persistence_error(e, "Response"))?;

    let guest_entries: Vec<GuestWindows> = responses
        .iter()
        .filter_map(|response| {
            response.windows_for(&date_key).map(|windows| GuestWindows {
                guest_name: response.guest_name.clone(),
                windows: windows.to_vec(),
            })
        })
        .collect();

    let planner_windows: Vec<TimeWindow> = plan.planner_windows(&date_key).to_vec();
    let grid: TimeGrid = TimeGrid::build(&planner_windows, &guest_entries);

    let blocks: Vec<TimeBlockInfo> = grid
        .blocks()
        .iter()
        .map(|block| TimeBlockInfo {
            index: block.index,
            start_minute: block.start_minute,
            end_minute: block.end_minute,
            in_planner_window: block.in_planner_window,
            count: block.count,
            names: block.names.clone(),
            tier: grid.tier_for(block).map(|t| t.level()),
        })
        .collect();

    Ok(TimeGridResponse {
        date: date_key,
        blocks,
        max_count: grid.max_count(),
    })
}
