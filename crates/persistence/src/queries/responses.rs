// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Response queries.
//!
//! Result views depend on stable submission order, so every listing here
//! orders by creation timestamp ascending with the row ID as tiebreaker.

use diesel::prelude::*;
use diesel::SqliteConnection;
use muster_domain::Response;

use crate::data_models::{decode_dates, decode_windows};
use crate::diesel_schema::responses;
use crate::error::PersistenceError;

/// The full response row as loaded from the `responses` table.
type ResponseRow = (
    i64,
    i64,
    String,
    String,
    Option<String>,
    Option<String>,
    String,
);

fn response_from_row(row: ResponseRow) -> Result<Response, PersistenceError> {
    let (response_id, plan_id, guest_name, selected_dates, comment, selected_time_windows, _created_at) =
        row;

    let selected_dates = decode_dates(&selected_dates, "responses")?;
    let selected_time_windows = decode_windows(selected_time_windows.as_deref())?;

    let mut response: Response = Response::new(
        plan_id,
        guest_name,
        selected_dates,
        comment,
        selected_time_windows,
    );
    response.response_id = Some(response_id);

    Ok(response)
}

/// Lists all responses for a plan in submission order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `plan_id` - The plan ID
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_responses_for_plan(
    conn: &mut SqliteConnection,
    plan_id: i64,
) -> Result<Vec<Response>, PersistenceError> {
    let rows: Vec<ResponseRow> = responses::table
        .filter(responses::plan_id.eq(plan_id))
        .order(responses::created_at.asc())
        .then_order_by(responses::response_id.asc())
        .select(responses::all_columns)
        .load::<ResponseRow>(conn)?;

    rows.into_iter().map(response_from_row).collect()
}

/// Gets a single response by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `response_id` - The response ID
///
/// # Errors
///
/// Returns an error if the response does not exist or the query fails.
pub fn get_response(
    conn: &mut SqliteConnection,
    response_id: i64,
) -> Result<Response, PersistenceError> {
    let row: ResponseRow = responses::table
        .filter(responses::response_id.eq(response_id))
        .select(responses::all_columns)
        .first::<ResponseRow>(conn)?;

    response_from_row(row)
}

/// Counts the responses submitted against a plan.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `plan_id` - The plan ID
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_responses_for_plan(
    conn: &mut SqliteConnection,
    plan_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(responses::table
        .filter(responses::plan_id.eq(plan_id))
        .count()
        .get_result::<i64>(conn)?)
}
