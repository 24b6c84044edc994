// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plan mutations.
//!
//! Plans are immutable after creation except for the description. Deleting
//! a plan relies on `ON DELETE CASCADE` to remove its responses.

use diesel::prelude::*;
use diesel::SqliteConnection;
use muster_domain::{Plan, day_key};

use crate::data_models::{encode_dates, encode_windows, now_iso8601};
use crate::diesel_schema::plans;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a new plan and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `plan` - The plan to persist; its `plan_id` is ignored
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., duplicate slug).
pub fn insert_plan(conn: &mut SqliteConnection, plan: &Plan) -> Result<i64, PersistenceError> {
    let available_dates: String = encode_dates(&plan.available_dates)?;
    let time_windows: Option<String> = encode_windows(plan.time_windows.as_ref())?;
    let desired_duration: Option<i32> = plan
        .desired_duration
        .map(|d| {
            i32::try_from(d).map_err(|e| PersistenceError::SerializationError(e.to_string()))
        })
        .transpose()?;
    let created_at: String = now_iso8601()?;

    diesel::insert_into(plans::table)
        .values((
            plans::slug.eq(&plan.slug),
            plans::name.eq(&plan.name),
            plans::description.eq(plan.description.as_deref()),
            plans::start_date.eq(day_key(plan.start_date)),
            plans::end_date.eq(day_key(plan.end_date)),
            plans::mode.eq(plan.mode.as_str()),
            plans::available_dates.eq(available_dates),
            plans::time_windows.eq(time_windows),
            plans::desired_duration.eq(desired_duration),
            plans::creator_id.eq(&plan.creator_id),
            plans::creator_name.eq(plan.creator_name.as_deref()),
            plans::created_at.eq(created_at),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Updates a plan's description.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `plan_id` - The plan ID
/// * `description` - The new description; `None` clears it
///
/// # Errors
///
/// Returns an error if the plan does not exist or the update fails.
pub fn update_plan_description(
    conn: &mut SqliteConnection,
    plan_id: i64,
    description: Option<&str>,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(plans::table.filter(plans::plan_id.eq(plan_id)))
        .set(plans::description.eq(description))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Plan {plan_id} not found"
        )));
    }

    Ok(())
}

/// Deletes a plan and, via cascade, all of its responses.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `plan_id` - The plan ID
///
/// # Errors
///
/// Returns an error if the plan does not exist or the delete fails.
pub fn delete_plan(conn: &mut SqliteConnection, plan_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(plans::table.filter(plans::plan_id.eq(plan_id))).execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Plan {plan_id} not found"
        )));
    }

    Ok(())
}
