// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use muster_domain::DomainError;
use muster_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The authenticated owner does not own the resource being acted on.
    Forbidden {
        /// The action that was attempted.
        action: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden { action } => {
                write!(f, "Forbidden: '{action}' requires ownership of the plan")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the owner does not control the resource.
    Forbidden {
        /// The action that was attempted.
        action: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden { action } => {
                write!(f, "Forbidden: '{action}' requires ownership of the plan")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Forbidden { action } => Self::Forbidden { action },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidGuestName(msg) => ApiError::InvalidInput {
            field: String::from("guest_name"),
            message: msg,
        },
        DomainError::InvalidMode(mode) => ApiError::InvalidInput {
            field: String::from("mode"),
            message: format!("Unknown plan mode: '{mode}'"),
        },
        DomainError::InvalidDateRange { start, end } => ApiError::InvalidInput {
            field: String::from("start_date"),
            message: format!("Plan range is inverted: {start} is after {end}"),
        },
        DomainError::DateOutOfRange { date } => ApiError::InvalidInput {
            field: String::from("selected_dates"),
            message: format!("Date {date} falls outside the plan's range"),
        },
        DomainError::DateNotOffered { date } => ApiError::InvalidInput {
            field: String::from("selected_dates"),
            message: format!("Date {date} is not among the planner's offered dates"),
        },
        DomainError::EmptySelection => ApiError::InvalidInput {
            field: String::from("selected_dates"),
            message: String::from("At least one date must be selected"),
        },
        DomainError::MissingTimeWindows { date_key } => ApiError::InvalidInput {
            field: String::from("selected_time_windows"),
            message: format!("Selected date {date_key} requires at least one time window"),
        },
        DomainError::InvalidTimeWindow { start, end } => ApiError::InvalidInput {
            field: String::from("time_windows"),
            message: format!(
                "Invalid time window: '{start}'..'{end}' (expected HH:mm with start before end)"
            ),
        },
        DomainError::InvalidDayKey(key) => ApiError::InvalidInput {
            field: String::from("time_windows"),
            message: format!("Invalid day key: '{key}' (expected YYYY-MM-DD)"),
        },
        DomainError::InvalidDesiredDuration(minutes) => ApiError::InvalidInput {
            field: String::from("desired_duration"),
            message: format!("Invalid desired duration: {minutes}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// # Arguments
///
/// * `err` - The persistence error
/// * `resource_type` - The resource being acted on, for not-found messages
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, resource_type: &str) -> ApiError {
    match err {
        PersistenceError::NotFound(msg)
        | PersistenceError::OwnerNotFound(msg)
        | PersistenceError::SessionNotFound(msg) => ApiError::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: msg,
        },
        _ => ApiError::Internal {
            message: format!("Persistence error: {err}"),
        },
    }
}
