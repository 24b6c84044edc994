// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Owner and session mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::now_iso8601;
use crate::diesel_schema::{owners, sessions};
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a new owner account and returns its assigned ID.
///
/// The password is hashed with bcrypt before it touches the database.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `login_name` - The unique login name
/// * `display_name` - The display name shown to guests
/// * `password` - The plain text password (will be hashed)
///
/// # Errors
///
/// Returns an error if hashing fails or the insert fails (e.g., duplicate
/// login name).
pub fn insert_owner(
    conn: &mut SqliteConnection,
    login_name: &str,
    display_name: &str,
    password: &str,
) -> Result<i64, PersistenceError> {
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::HashingError(e.to_string()))?;
    let created_at: String = now_iso8601()?;

    diesel::insert_into(owners::table)
        .values((
            owners::login_name.eq(login_name),
            owners::display_name.eq(display_name),
            owners::password_hash.eq(&password_hash),
            owners::created_at.eq(created_at),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Records a successful login for an owner.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner_id` - The owner ID
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_last_login(
    conn: &mut SqliteConnection,
    owner_id: i64,
) -> Result<(), PersistenceError> {
    let now: String = now_iso8601()?;

    diesel::update(owners::table.filter(owners::owner_id.eq(owner_id)))
        .set(owners::last_login_at.eq(now))
        .execute(conn)?;

    Ok(())
}

/// Inserts a new session and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The opaque bearer token
/// * `owner_id` - The owner this session authenticates
/// * `expires_at` - The expiry timestamp (ISO 8601)
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    owner_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    let created_at: String = now_iso8601()?;

    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::owner_id.eq(owner_id),
            sessions::created_at.eq(created_at),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Deletes a session by its bearer token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The token of the session to delete
///
/// # Errors
///
/// Returns an error if the session does not exist or the delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::SessionNotFound(
            "unknown session token".to_string(),
        ));
    }

    Ok(())
}

/// Deletes all sessions that expired at or before the given instant.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `now` - The current instant (ISO 8601)
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(sessions::table.filter(sessions::expires_at.le(now)))
            .execute(conn)?,
    )
}
