// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use muster_persistence::Persistence;

use super::helpers::{TEST_PASSWORD, register_and_login};
use crate::auth::AuthenticationService;
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{LoginRequest, RegisterOwnerRequest};

fn register_request(login_name: &str) -> RegisterOwnerRequest {
    RegisterOwnerRequest {
        login_name: login_name.to_string(),
        display_name: String::from("Alex"),
        password: TEST_PASSWORD.to_string(),
        confirmation: TEST_PASSWORD.to_string(),
    }
}

#[test]
fn registration_rejects_empty_login_name() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let result = handlers::register_owner(&mut persistence, &register_request("   "));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "login_name"
    ));
}

#[test]
fn registration_rejects_weak_passwords() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let mut request: RegisterOwnerRequest = register_request("alex");
    request.password = String::from("short1");
    request.confirmation = String::from("short1");
    let result = handlers::register_owner(&mut persistence, &request);
    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));

    let mut request: RegisterOwnerRequest = register_request("alex");
    request.password = String::from("nodigitshere");
    request.confirmation = String::from("nodigitshere");
    let result = handlers::register_owner(&mut persistence, &request);
    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
}

#[test]
fn registration_rejects_mismatched_confirmation() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let mut request: RegisterOwnerRequest = register_request("alex");
    request.confirmation = String::from("different passw0rd");
    let result = handlers::register_owner(&mut persistence, &request);
    assert!(matches!(
        result,
        Err(ApiError::PasswordPolicyViolation { .. })
    ));
}

#[test]
fn registration_rejects_taken_login_names() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    handlers::register_owner(&mut persistence, &register_request("alex")).expect("register");
    let result = handlers::register_owner(&mut persistence, &register_request("alex"));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "login_name"
    ));
}

#[test]
fn login_round_trip() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    handlers::register_owner(&mut persistence, &register_request("alex")).expect("register");

    let response = handlers::login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("alex"),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .expect("login");

    assert_eq!(response.login_name, "alex");
    assert_eq!(response.display_name, "Alex");
    assert!(!response.session_token.is_empty());

    let owner = AuthenticationService::validate_session(&mut persistence, &response.session_token)
        .expect("validate session");
    assert_eq!(owner.login_name, "alex");

    handlers::logout(&mut persistence, &response.session_token).expect("logout");
    let result = AuthenticationService::validate_session(&mut persistence, &response.session_token);
    assert!(result.is_err());
}

#[test]
fn login_rejects_wrong_password() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    handlers::register_owner(&mut persistence, &register_request("alex")).expect("register");

    let result = handlers::login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("alex"),
            password: String::from("wrong passw0rd"),
        },
    );
    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn login_rejects_unknown_owner() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let result = handlers::login(
        &mut persistence,
        &LoginRequest {
            login_name: String::from("nobody"),
            password: TEST_PASSWORD.to_string(),
        },
    );
    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn expired_sessions_are_rejected() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let owner = register_and_login(&mut persistence, "alex", "Alex");
    persistence
        .insert_session("stale-token", owner.owner_id, "2020-01-01T00:00:00Z")
        .expect("insert session");

    let result = AuthenticationService::validate_session(&mut persistence, "stale-token");
    assert!(result.is_err());
}

#[test]
fn whoami_reflects_the_session_owner() {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let owner = register_and_login(&mut persistence, "alex", "Alex");
    let response = handlers::whoami(&owner);
    assert_eq!(response.login_name, "alex");
    assert_eq!(response.display_name, "Alex");
}
