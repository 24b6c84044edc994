// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for Muster.
//!
//! This crate sits between the HTTP server and the domain/persistence
//! layers. It owns:
//!
//! - Session-based authentication and the ownership authorization rule
//! - Request/response DTOs with day-key dates on the wire
//! - Explicit translation of domain and persistence errors into the API
//!   error contract
//! - The handler functions the server routes dispatch to
//!
//! Handlers never leak Diesel or domain error types; everything crossing
//! this boundary is an [`ApiError`].

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

pub mod auth;
pub mod error;
pub mod handlers;
pub mod password_policy;
pub mod request_response;
pub mod slug;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedOwner, AuthenticationService, AuthorizationService};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
