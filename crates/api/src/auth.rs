// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use muster_domain::Plan;
use muster_persistence::{OwnerData, Persistence, PersistenceError, SessionData};
use time::{Duration, OffsetDateTime};

use crate::error::AuthError;

/// An authenticated plan owner.
///
/// Owners are the only authenticated principals. Guests submit responses
/// without authentication, identified by a self-reported display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedOwner {
    /// The owner's canonical database ID.
    pub owner_id: i64,
    /// The identity recorded as `creator_id` on plans this owner creates.
    pub creator_id: String,
    /// The owner's login name.
    pub login_name: String,
    /// The owner's display name, shown to guests.
    pub display_name: String,
}

impl AuthenticatedOwner {
    /// Builds the authenticated principal from a persisted owner record.
    #[must_use]
    pub fn from_owner(owner: &OwnerData) -> Self {
        Self {
            owner_id: owner.owner_id,
            creator_id: owner.owner_id.to_string(),
            login_name: owner.login_name.clone(),
            display_name: owner.display_name.clone(),
        }
    }
}

/// Authorization service for enforcing plan ownership.
///
/// Ownership is the only authorization rule: whoever created a plan may
/// manage it and its responses, and nobody else may.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the authenticated owner created the given plan.
    ///
    /// # Arguments
    ///
    /// * `owner` - The authenticated owner
    /// * `plan` - The plan being acted on
    /// * `action` - The action name, used in error messages
    ///
    /// # Errors
    ///
    /// Returns an error if the plan was created by someone else.
    pub fn authorize_plan_owner(
        owner: &AuthenticatedOwner,
        plan: &Plan,
        action: &str,
    ) -> Result<(), AuthError> {
        if plan.creator_id == owner.creator_id {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                action: action.to_string(),
            })
        }
    }
}

/// Authentication service for session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates an owner by credentials and creates a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `login_name` - The owner login name
    /// * `password` - The plain text password
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_owner`)
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong or session creation fails.
    pub fn login(
        persistence: &mut Persistence,
        login_name: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedOwner), AuthError> {
        let owner: OwnerData = persistence
            .get_owner_by_login(login_name)
            .map_err(|e| match e {
                PersistenceError::OwnerNotFound(_) => AuthError::AuthenticationFailed {
                    reason: String::from("Unknown login name or wrong password"),
                },
                _ => AuthError::AuthenticationFailed {
                    reason: format!("Database error: {e}"),
                },
            })?;

        let password_matches: bool = persistence
            .verify_password(password, &owner.password_hash)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Password verification failed: {e}"),
            })?;
        if !password_matches {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Unknown login name or wrong password"),
            });
        }

        let session_token: String = Self::generate_session_token();

        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            })?;

        persistence
            .insert_session(&session_token, owner.owner_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;

        persistence
            .update_last_login(owner.owner_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        Ok((session_token, AuthenticatedOwner::from_owner(&owner)))
    }

    /// Validates a session token and returns the authenticated owner.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `session_token` - The session token to validate
    ///
    /// # Errors
    ///
    /// Returns an error if the session is invalid or expired.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedOwner, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &time::format_description::well_known::Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;

        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let owner: OwnerData = persistence
            .get_owner_by_id(session.owner_id)
            .map_err(Self::map_persistence_error)?;

        Ok(AuthenticatedOwner::from_owner(&owner))
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
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates an opaque session token.
    fn generate_session_token() -> String {
        let timestamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> AuthError {
        match err {
            PersistenceError::SessionNotFound(_) => AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            },
            PersistenceError::OwnerNotFound(_) => AuthError::AuthenticationFailed {
                reason: String::from("Owner not found"),
            },
            _ => AuthError::AuthenticationFailed {
                reason: format!("Database error: {err}"),
            },
        }
    }
}
