// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row-level data carriers and the JSON codecs for structured columns.
//!
//! Date lists and time-window maps are stored as JSON text columns. The
//! codecs here are the only place those columns are encoded or decoded, so
//! the day-key normalization stays consistent with the domain crate.

use crate::error::PersistenceError;
use muster_domain::{TimeWindow, day_key, parse_day_key};
use std::collections::BTreeMap;
use time::Date;
use time::format_description::well_known::Iso8601;

/// A persisted owner account.
///
/// Owners are the only authenticated principals; guests never have accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerData {
    /// Canonical identifier assigned by the database.
    pub owner_id: i64,
    /// Unique login name.
    pub login_name: String,
    /// Display name shown to guests as the plan creator.
    pub display_name: String,
    /// bcrypt hash of the owner's password.
    pub password_hash: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Last successful login timestamp (ISO 8601), if any.
    pub last_login_at: Option<String>,
}

/// A persisted login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    /// Canonical identifier assigned by the database.
    pub session_id: i64,
    /// The opaque bearer token.
    pub session_token: String,
    /// The owner this session authenticates.
    pub owner_id: i64,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Expiry timestamp (ISO 8601).
    pub expires_at: String,
}

/// A plan together with its response count, for dashboard listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    /// The plan itself.
    pub plan: muster_domain::Plan,
    /// Number of responses submitted so far.
    pub response_count: i64,
    /// Creation timestamp (ISO 8601), used for newest-first ordering.
    pub created_at: String,
}

/// Formats the current UTC instant as an ISO 8601 timestamp.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub(crate) fn now_iso8601() -> Result<String, PersistenceError> {
    time::OffsetDateTime::now_utc()
        .format(&Iso8601::DEFAULT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Encodes a date list as a JSON array of canonical day keys.
pub(crate) fn encode_dates(dates: &[Date]) -> Result<String, PersistenceError> {
    let keys: Vec<String> = dates.iter().map(|d| day_key(*d)).collect();
    Ok(serde_json::to_string(&keys)?)
}

/// Decodes a JSON array of day keys back into dates, preserving order.
pub(crate) fn decode_dates(json: &str, table: &str) -> Result<Vec<Date>, PersistenceError> {
    let keys: Vec<String> = serde_json::from_str(json)?;
    keys.iter()
        .map(|key| {
            parse_day_key(key).map_err(|e| PersistenceError::CorruptRecord {
                table: table.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Encodes a sparse day-key → window-list map as JSON.
pub(crate) fn encode_windows(
    windows: Option<&BTreeMap<String, Vec<TimeWindow>>>,
) -> Result<Option<String>, PersistenceError> {
    windows
        .map(|map| serde_json::to_string(map).map_err(PersistenceError::from))
        .transpose()
}

/// Decodes a JSON day-key → window-list map.
pub(crate) fn decode_windows(
    json: Option<&str>,
) -> Result<Option<BTreeMap<String, Vec<TimeWindow>>>, PersistenceError> {
    json.map(|text| serde_json::from_str(text).map_err(PersistenceError::from))
        .transpose()
}
