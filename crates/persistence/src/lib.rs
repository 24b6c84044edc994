// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Muster.
//!
//! This crate stores plans, guest responses, owner accounts, and login
//! sessions in `SQLite` via Diesel. Structured fields (date lists and
//! per-day time-window maps) are stored as JSON text columns and decoded
//! back into domain types at the query boundary.
//!
//! ## Backend
//!
//! `SQLite` is the only backend:
//! - In-memory databases for unit and integration tests, isolated per
//!   instance via an atomic counter
//! - File-based databases with WAL mode for deployments
//!
//! Foreign key enforcement is verified at startup because plan deletion
//! relies on `ON DELETE CASCADE` to remove responses.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use muster_domain::{Plan, Response};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{OwnerData, PlanSummary, SessionData};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for plans, responses, owners, and sessions.
///
/// All domain queries and mutations go through this adapter; the Diesel
/// connection never leaves the crate.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        // Use atomic counter instead of timestamp to eliminate race conditions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file databases
        sqlite::enable_wal_mode(&mut conn)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Plans
    // ========================================================================

    /// Inserts a new plan and returns its assigned ID.
    ///
    /// # Arguments
    ///
    /// * `plan` - The plan to persist; its `plan_id` is ignored
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g., duplicate slug).
    pub fn insert_plan(&mut self, plan: &Plan) -> Result<i64, PersistenceError> {
        mutations::plans::insert_plan(&mut self.conn, plan)
    }

    /// Gets a plan by its share slug.
    ///
    /// # Arguments
    ///
    /// * `slug` - The plan's share slug
    ///
    /// # Errors
    ///
    /// Returns an error if no plan carries the slug or the query fails.
    pub fn get_plan_by_slug(&mut self, slug: &str) -> Result<Plan, PersistenceError> {
        queries::plans::get_plan_by_slug(&mut self.conn, slug)
    }

    /// Lists a creator's plans, newest first, with response counts.
    ///
    /// # Arguments
    ///
    /// * `creator_id` - The owning user's identity
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_plans_for_creator(
        &mut self,
        creator_id: &str,
    ) -> Result<Vec<PlanSummary>, PersistenceError> {
        queries::plans::list_plans_for_creator(&mut self.conn, creator_id)
    }

    /// Updates a plan's description.
    ///
    /// # Arguments
    ///
    /// * `plan_id` - The plan ID
    /// * `description` - The new description; `None` clears it
    ///
    /// # Errors
    ///
    /// Returns an error if the plan does not exist or the update fails.
    pub fn update_plan_description(
        &mut self,
        plan_id: i64,
        description: Option<&str>,
    ) -> Result<(), PersistenceError> {
        mutations::plans::update_plan_description(&mut self.conn, plan_id, description)
    }

    /// Deletes a plan and, via cascade, all of its responses.
    ///
    /// # Arguments
    ///
    /// * `plan_id` - The plan ID
    ///
    /// # Errors
    ///
    /// Returns an error if the plan does not exist or the delete fails.
    pub fn delete_plan(&mut self, plan_id: i64) -> Result<(), PersistenceError> {
        mutations::plans::delete_plan(&mut self.conn, plan_id)
    }

    // ========================================================================
    // Responses
    // ========================================================================

    /// Inserts a new response and returns its assigned ID.
    ///
    /// # Arguments
    ///
    /// * `response` - The response to persist; its `response_id` is ignored
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g., the plan does not exist).
    pub fn insert_response(&mut self, response: &Response) -> Result<i64, PersistenceError> {
        mutations::responses::insert_response(&mut self.conn, response)
    }

    /// Lists all responses for a plan in submission order.
    ///
    /// # Arguments
    ///
    /// * `plan_id` - The plan ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_responses_for_plan(
        &mut self,
        plan_id: i64,
    ) -> Result<Vec<Response>, PersistenceError> {
        queries::responses::list_responses_for_plan(&mut self.conn, plan_id)
    }

    /// Gets a single response by ID.
    ///
    /// # Arguments
    ///
    /// * `response_id` - The response ID
    ///
    /// # Errors
    ///
    /// Returns an error if the response does not exist or the query fails.
    pub fn get_response(&mut self, response_id: i64) -> Result<Response, PersistenceError> {
        queries::responses::get_response(&mut self.conn, response_id)
    }

    /// Counts the responses submitted against a plan.
    ///
    /// # Arguments
    ///
    /// * `plan_id` - The plan ID
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_responses_for_plan(&mut self, plan_id: i64) -> Result<i64, PersistenceError> {
        queries::responses::count_responses_for_plan(&mut self.conn, plan_id)
    }

    /// Deletes a response.
    ///
    /// # Arguments
    ///
    /// * `response_id` - The response ID
    ///
    /// # Errors
    ///
    /// Returns an error if the response does not exist or the delete fails.
    pub fn delete_response(&mut self, response_id: i64) -> Result<(), PersistenceError> {
        mutations::responses::delete_response(&mut self.conn, response_id)
    }

    // ========================================================================
    // Owners & Sessions
    // ========================================================================

    /// Inserts a new owner account and returns its assigned ID.
    ///
    /// # Arguments
    ///
    /// * `login_name` - The unique login name
    /// * `display_name` - The display name shown to guests
    /// * `password` - The plain text password (will be hashed)
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the insert fails (e.g.,
    /// duplicate login name).
    pub fn insert_owner(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::identity::insert_owner(&mut self.conn, login_name, display_name, password)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Arguments
    ///
    /// * `password` - The plain text password to verify
    /// * `password_hash` - The stored bcrypt hash
    ///
    /// # Errors
    ///
    /// Returns an error if password verification fails.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::identity::verify_password(password, password_hash)
    }

    /// Gets an owner by login name.
    ///
    /// # Arguments
    ///
    /// * `login_name` - The login name to look up
    ///
    /// # Errors
    ///
    /// Returns an error if no owner carries the login name or the query fails.
    pub fn get_owner_by_login(&mut self, login_name: &str) -> Result<OwnerData, PersistenceError> {
        queries::identity::get_owner_by_login(&mut self.conn, login_name)
    }

    /// Gets an owner by ID.
    ///
    /// # Arguments
    ///
    /// * `owner_id` - The owner ID
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist or the query fails.
    pub fn get_owner_by_id(&mut self, owner_id: i64) -> Result<OwnerData, PersistenceError> {
        queries::identity::get_owner_by_id(&mut self.conn, owner_id)
    }

    /// Checks whether a login name is already taken.
    ///
    /// # Arguments
    ///
    /// * `login_name` - The login name to check
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn owner_login_exists(&mut self, login_name: &str) -> Result<bool, PersistenceError> {
        queries::identity::owner_login_exists(&mut self.conn, login_name)
    }

    /// Records a successful login for an owner.
    ///
    /// # Arguments
    ///
    /// * `owner_id` - The owner ID
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, owner_id: i64) -> Result<(), PersistenceError> {
        mutations::identity::update_last_login(&mut self.conn, owner_id)
    }

    /// Inserts a new session and returns its assigned ID.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The opaque bearer token
    /// * `owner_id` - The owner this session authenticates
    /// * `expires_at` - The expiry timestamp (ISO 8601)
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_session(
        &mut self,
        session_token: &str,
        owner_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::identity::insert_session(&mut self.conn, session_token, owner_id, expires_at)
    }

    /// Gets a session by its bearer token.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The opaque bearer token
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist or the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<SessionData, PersistenceError> {
        queries::identity::get_session_by_token(&mut self.conn, session_token)
    }

    /// Deletes a session by its bearer token.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The token of the session to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the session does not exist or the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::identity::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all sessions that expired at or before the given instant.
    ///
    /// # Arguments
    ///
    /// * `now` - The current instant (ISO 8601)
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::identity::delete_expired_sessions(&mut self.conn, now)
    }
}
