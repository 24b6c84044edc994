// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plan queries.
//!
//! Plans are addressed by their share slug from the public surface and by
//! creator identity from the dashboard surface. Structured columns are
//! decoded through the codecs in `data_models`.

use diesel::prelude::*;
use diesel::SqliteConnection;
use muster_domain::{Plan, PlanMode, parse_day_key};
use std::str::FromStr;

use crate::data_models::{PlanSummary, decode_dates, decode_windows};
use crate::diesel_schema::{plans, responses};
use crate::error::PersistenceError;

/// The full plan row as loaded from the `plans` table.
type PlanRow = (
    i64,
    String,
    String,
    Option<String>,
    String,
    String,
    String,
    String,
    Option<String>,
    Option<i32>,
    String,
    Option<String>,
    String,
);

/// Rehydrates a domain `Plan` from its row, returning the creation
/// timestamp alongside it.
fn plan_from_row(row: PlanRow) -> Result<(Plan, String), PersistenceError> {
    let (
        plan_id,
        slug,
        name,
        description,
        start_date,
        end_date,
        mode,
        available_dates,
        time_windows,
        desired_duration,
        creator_id,
        creator_name,
        created_at,
    ) = row;

    let corrupt = |reason: String| PersistenceError::CorruptRecord {
        table: "plans".to_string(),
        reason,
    };

    let mode: PlanMode = PlanMode::from_str(&mode).map_err(|e| corrupt(e.to_string()))?;
    let start_date = parse_day_key(&start_date).map_err(|e| corrupt(e.to_string()))?;
    let end_date = parse_day_key(&end_date).map_err(|e| corrupt(e.to_string()))?;
    let available_dates = decode_dates(&available_dates, "plans")?;
    let time_windows = decode_windows(time_windows.as_deref())?;
    let desired_duration: Option<u32> = desired_duration
        .map(|d| u32::try_from(d).map_err(|e| corrupt(e.to_string())))
        .transpose()?;

    let mut plan: Plan = Plan::new(
        slug,
        name,
        description,
        start_date,
        end_date,
        mode,
        available_dates,
        time_windows,
        desired_duration,
        creator_id,
        creator_name,
    );
    plan.plan_id = Some(plan_id);

    Ok((plan, created_at))
}

/// Gets a plan by its share slug.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `slug` - The plan's share slug
///
/// # Errors
///
/// Returns an error if no plan carries the slug or the query fails.
pub fn get_plan_by_slug(conn: &mut SqliteConnection, slug: &str) -> Result<Plan, PersistenceError> {
    let row: PlanRow = plans::table
        .filter(plans::slug.eq(slug))
        .select(plans::all_columns)
        .first::<PlanRow>(conn)?;

    let (plan, _created_at) = plan_from_row(row)?;
    Ok(plan)
}

/// Lists a creator's plans, newest first, with response counts.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `creator_id` - The owning user's identity
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_plans_for_creator(
    conn: &mut SqliteConnection,
    creator_id: &str,
) -> Result<Vec<PlanSummary>, PersistenceError> {
    let rows: Vec<PlanRow> = plans::table
        .filter(plans::creator_id.eq(creator_id))
        .order(plans::created_at.desc())
        .then_order_by(plans::plan_id.desc())
        .select(plans::all_columns)
        .load::<PlanRow>(conn)?;

    let mut summaries: Vec<PlanSummary> = Vec::with_capacity(rows.len());
    for row in rows {
        let (plan, created_at) = plan_from_row(row)?;
        let plan_id: i64 = plan.plan_id.unwrap_or(0);
        let response_count: i64 = responses::table
            .filter(responses::plan_id.eq(plan_id))
            .count()
            .get_result::<i64>(conn)?;
        summaries.push(PlanSummary {
            plan,
            response_count,
            created_at,
        });
    }

    Ok(summaries)
}
