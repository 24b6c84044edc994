// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Response mutations.
//!
//! Responses are write-once: they are inserted when a guest submits and
//! may only be deleted, never edited.

use diesel::prelude::*;
use diesel::SqliteConnection;
use muster_domain::Response;

use crate::data_models::{encode_dates, encode_windows, now_iso8601};
use crate::diesel_schema::responses;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a new response and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `response` - The response to persist; its `response_id` is ignored
///
/// # Errors
///
/// Returns an error if the insert fails (e.g., the plan does not exist).
pub fn insert_response(
    conn: &mut SqliteConnection,
    response: &Response,
) -> Result<i64, PersistenceError> {
    let selected_dates: String = encode_dates(&response.selected_dates)?;
    let selected_time_windows: Option<String> =
        encode_windows(response.selected_time_windows.as_ref())?;
    let created_at: String = now_iso8601()?;

    diesel::insert_into(responses::table)
        .values((
            responses::plan_id.eq(response.plan_id),
            responses::guest_name.eq(&response.guest_name),
            responses::selected_dates.eq(selected_dates),
            responses::comment.eq(response.comment.as_deref()),
            responses::selected_time_windows.eq(selected_time_windows),
            responses::created_at.eq(created_at),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Deletes a response.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `response_id` - The response ID
///
/// # Errors
///
/// Returns an error if the response does not exist or the delete fails.
pub fn delete_response(
    conn: &mut SqliteConnection,
    response_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(responses::table.filter(responses::response_id.eq(response_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Response {response_id} not found"
        )));
    }

    Ok(())
}
