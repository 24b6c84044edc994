// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Owner and session queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{OwnerData, SessionData};
use crate::diesel_schema::{owners, sessions};
use crate::error::PersistenceError;

type OwnerRow = (i64, String, String, String, String, Option<String>);
type SessionRow = (i64, String, i64, String, String);

fn owner_from_row(row: OwnerRow) -> OwnerData {
    let (owner_id, login_name, display_name, password_hash, created_at, last_login_at) = row;
    OwnerData {
        owner_id,
        login_name,
        display_name,
        password_hash,
        created_at,
        last_login_at,
    }
}

fn session_from_row(row: SessionRow) -> SessionData {
    let (session_id, session_token, owner_id, created_at, expires_at) = row;
    SessionData {
        session_id,
        session_token,
        owner_id,
        created_at,
        expires_at,
    }
}

/// Gets an owner by login name.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `login_name` - The login name to look up
///
/// # Errors
///
/// Returns an error if no owner carries the login name or the query fails.
pub fn get_owner_by_login(
    conn: &mut SqliteConnection,
    login_name: &str,
) -> Result<OwnerData, PersistenceError> {
    let row: OwnerRow = owners::table
        .filter(owners::login_name.eq(login_name))
        .select(owners::all_columns)
        .first::<OwnerRow>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::OwnerNotFound(login_name.to_string())
            }
            _ => PersistenceError::from(e),
        })?;

    Ok(owner_from_row(row))
}

/// Gets an owner by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `owner_id` - The owner ID
///
/// # Errors
///
/// Returns an error if the owner does not exist or the query fails.
pub fn get_owner_by_id(
    conn: &mut SqliteConnection,
    owner_id: i64,
) -> Result<OwnerData, PersistenceError> {
    let row: OwnerRow = owners::table
        .filter(owners::owner_id.eq(owner_id))
        .select(owners::all_columns)
        .first::<OwnerRow>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::OwnerNotFound(owner_id.to_string())
            }
            _ => PersistenceError::from(e),
        })?;

    Ok(owner_from_row(row))
}

/// Checks whether a login name is already taken.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `login_name` - The login name to check
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn owner_login_exists(
    conn: &mut SqliteConnection,
    login_name: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = owners::table
        .filter(owners::login_name.eq(login_name))
        .count()
        .get_result::<i64>(conn)?;

    Ok(count > 0)
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Arguments
///
/// * `password` - The plain text password to verify
/// * `password_hash` - The stored bcrypt hash
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::HashingError(e.to_string()))
}

/// Gets a session by its bearer token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The opaque bearer token
///
/// # Errors
///
/// Returns an error if the session does not exist or the query fails.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<SessionData, PersistenceError> {
    let row: SessionRow = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(sessions::all_columns)
        .first::<SessionRow>(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::SessionNotFound("unknown session token".to_string())
            }
            _ => PersistenceError::from(e),
        })?;

    Ok(session_from_row(row))
}
