// Copyright (C) 2026 Muster Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use muster_api::{
    ApiError, AuthenticatedOwner, AuthenticationService, handlers,
    request_response::{
        CreatePlanRequest, CreatePlanResponse, DeletePlanResponse, DeleteResponseResponse,
        ListPlansResponse, LoginRequest, LoginResponse, PlanInfo, PlanResultsResponse,
        RegisterOwnerRequest, RegisterOwnerResponse, SubmitResponseRequest, SubmitResponseResponse,
        TimeGridResponse, WhoAmIResponse,
    },
};
use muster_domain::TimeWindow;
use muster_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Muster Server - HTTP server for the Muster scheduling service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for plans, responses, and sessions.
    persistence: Arc<Mutex<Persistence>>,
}

/// API request for registering an owner account.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterOwnerApiRequest {
    /// The unique login name.
    login_name: String,
    /// The display name shown to guests.
    display_name: String,
    /// The password.
    password: String,
    /// The password confirmation.
    confirmation: String,
}

/// API request for logging in.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoginApiRequest {
    /// The owner login name.
    login_name: String,
    /// The password.
    password: String,
}

/// API request for creating a plan.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreatePlanApiRequest {
    /// The plan display name.
    name: String,
    /// Optional description.
    #[serde(default)]
    description: Option<String>,
    /// First candidate day (inclusive), as `YYYY-MM-DD`.
    start_date: String,
    /// Last candidate day (inclusive), as `YYYY-MM-DD`.
    end_date: String,
    /// The plan mode wire string.
    #[serde(default = "default_mode")]
    mode: String,
    /// Planner-curated dates, as `YYYY-MM-DD` day keys.
    #[serde(default)]
    available_dates: Vec<String>,
    /// Planner reference windows keyed by day key.
    #[serde(default)]
    time_windows: Option<BTreeMap<String, Vec<TimeWindow>>>,
    /// Advisory meeting length in minutes.
    #[serde(default)]
    desired_duration: Option<u32>,
}

fn default_mode() -> String {
    String::from("DATE_RANGE")
}

/// API request for updating a plan description.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateDescriptionApiRequest {
    /// The new description; `null` clears it.
    description: Option<String>,
}

/// API request for a guest availability submission.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SubmitResponseApiRequest {
    /// The guest's display name.
    guest_name: String,
    /// The days the guest is available, as `YYYY-MM-DD` day keys.
    selected_dates: Vec<String>,
    /// Optional free-text comment.
    #[serde(default)]
    comment: Option<String>,
    /// Guest time windows keyed by day key.
    #[serde(default)]
    selected_time_windows: Option<BTreeMap<String, Vec<TimeWindow>>>,
}

/// Query parameters for the time grid endpoint.
#[derive(Debug, Deserialize)]
struct TimeGridQuery {
    /// The day to inspect, as `YYYY-MM-DD`.
    date: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::Forbidden { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Extracts the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Result<String, HttpError> {
    let header: &axum::http::HeaderValue =
        headers.get("authorization").ok_or_else(|| HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Missing Authorization header"),
        })?;

    let value: &str = header.to_str().map_err(|_| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: String::from("Malformed Authorization header"),
    })?;

    value
        .strip_prefix("Bearer ")
        .map(ToString::to_string)
        .ok_or_else(|| HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Authorization header must use the Bearer scheme"),
        })
}

/// Resolves the session token in the request headers to an owner.
async fn authenticate(app_state: &AppState, headers: &HeaderMap) -> Result<AuthenticatedOwner, HttpError> {
    let token: String = bearer_token(headers)?;

    let mut persistence = app_state.persistence.lock().await;
    let owner: AuthenticatedOwner = AuthenticationService::validate_session(&mut persistence, &token)
        .map_err(|e| HttpError::from(ApiError::from(e)))?;
    drop(persistence);

    Ok(owner)
}

/// Handler for POST `/owners` endpoint.
///
/// Registers a new owner account.
async fn handle_register_owner(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterOwnerApiRequest>,
) -> Result<Json<RegisterOwnerResponse>, HttpError> {
    info!(login_name = %req.login_name, "Handling register_owner request");

    let request: RegisterOwnerRequest = RegisterOwnerRequest {
        login_name: req.login_name,
        display_name: req.display_name,
        password: req.password,
        confirmation: req.confirmation,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterOwnerResponse = handlers::register_owner(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/login` endpoint.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginApiRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(login_name = %req.login_name, "Handling login request");

    let request: LoginRequest = LoginRequest {
        login_name: req.login_name,
        password: req.password,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = handlers::login(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/logout` endpoint.
///
/// Deletes the session named by the bearer token.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    info!("Handling logout request");

    let token: String = bearer_token(&headers)?;

    let mut persistence = app_state.persistence.lock().await;
    handlers::logout(&mut persistence, &token)?;
    drop(persistence);

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/whoami` endpoint.
async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    let owner: AuthenticatedOwner = authenticate(&app_state, &headers).await?;

    info!(login_name = %owner.login_name, "Handling whoami request");

    Ok(Json(handlers::whoami(&owner)))
}

/// Handler for POST `/plans` endpoint.
///
/// Creates a new plan owned by the authenticated owner.
async fn handle_create_plan(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePlanApiRequest>,
) -> Result<Json<CreatePlanResponse>, HttpError> {
    let owner: AuthenticatedOwner = authenticate(&app_state, &headers).await?;

    info!(
        login_name = %owner.login_name,
        name = %req.name,
        mode = %req.mode,
        "Handling create_plan request"
    );

    let request: CreatePlanRequest = CreatePlanRequest {
        name: req.name,
        description: req.description,
        start_date: req.start_date,
        end_date: req.end_date,
        mode: req.mode,
        available_dates: req.available_dates,
        time_windows: req.time_windows,
        desired_duration: req.desired_duration,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CreatePlanResponse = handlers::create_plan(&mut persistence, &request, &owner)?;
    drop(persistence);

    info!(plan_id = response.plan_id, slug = %response.slug, "Successfully created plan");

    Ok(Json(response))
}

/// Handler for GET `/plans` endpoint.
///
/// Lists the authenticated owner's plans, newest first.
async fn handle_list_plans(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListPlansResponse>, HttpError> {
    let owner: AuthenticatedOwner = authenticate(&app_state, &headers).await?;

    info!(login_name = %owner.login_name, "Handling list_plans request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListPlansResponse = handlers::list_plans(&mut persistence, &owner)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/plans/{slug}` endpoint.
///
/// Public: guests reach the plan through its share slug without a session.
async fn handle_fetch_plan(
    AxumState(app_state): AxumState<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PlanInfo>, HttpError> {
    info!(slug = %slug, "Handling fetch_plan request");

    let mut persistence = app_state.persistence.lock().await;
    let response: PlanInfo = handlers::fetch_plan(&mut persistence, &slug)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/plans/{slug}` endpoint.
///
/// Updates the plan description. Owner only.
async fn handle_update_plan_description(
    AxumState(app_state): AxumState<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Json(req): Json<UpdateDescriptionApiRequest>,
) -> Result<Json<PlanInfo>, HttpError> {
    let owner: AuthenticatedOwner = authenticate(&app_state, &headers).await?;

    info!(slug = %slug, login_name = %owner.login_name, "Handling update_plan_description request");

    let mut persistence = app_state.persistence.lock().await;
    let response: PlanInfo = handlers::update_plan_description(
        &mut persistence,
        &slug,
        req.description.as_deref(),
        &owner,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/plans/{slug}` endpoint.
///
/// Deletes the plan and all of its responses. Owner only.
async fn handle_delete_plan(
    AxumState(app_state): AxumState<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeletePlanResponse>, HttpError> {
    let owner: AuthenticatedOwner = authenticate(&app_state, &headers).await?;

    info!(slug = %slug, login_name = %owner.login_name, "Handling delete_plan request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeletePlanResponse = handlers::delete_plan(&mut persistence, &slug, &owner)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/plans/{slug}/responses` endpoint.
///
/// Public: guests submit availability without a session.
async fn handle_submit_response(
    AxumState(app_state): AxumState<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<SubmitResponseApiRequest>,
) -> Result<Json<SubmitResponseResponse>, HttpError> {
    info!(slug = %slug, guest_name = %req.guest_name, "Handling submit_response request");

    let request: SubmitResponseRequest = SubmitResponseRequest {
        guest_name: req.guest_name,
        selected_dates: req.selected_dates,
        comment: req.comment,
        selected_time_windows: req.selected_time_windows,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: SubmitResponseResponse =
        handlers::submit_response(&mut persistence, &slug, &request)?;
    drop(persistence);

    info!(
        slug = %slug,
        response_id = response.response_id,
        "Successfully recorded response"
    );

    Ok(Json(response))
}

/// Handler for DELETE `/plans/{slug}/responses/{response_id}` endpoint.
///
/// Removes a guest response. Owner only.
async fn handle_delete_response(
    AxumState(app_state): AxumState<AppState>,
    Path((slug, response_id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponseResponse>, HttpError> {
    let owner: AuthenticatedOwner = authenticate(&app_state, &headers).await?;

    info!(
        slug = %slug,
        response_id = response_id,
        login_name = %owner.login_name,
        "Handling delete_response request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteResponseResponse =
        handlers::delete_response(&mut persistence, &slug, response_id, &owner)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/plans/{slug}/results` endpoint.
///
/// Returns the aggregated day heatmap and all responses. Owner only.
async fn handle_fetch_results(
    AxumState(app_state): AxumState<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Json<PlanResultsResponse>, HttpError> {
    let owner: AuthenticatedOwner = authenticate(&app_state, &headers).await?;

    info!(slug = %slug, login_name = %owner.login_name, "Handling fetch_results request");

    let mut persistence = app_state.persistence.lock().await;
    let response: PlanResultsResponse = handlers::fetch_results(&mut persistence, &slug, &owner)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/plans/{slug}/results/time-grid` endpoint.
///
/// Returns the 96-block participation grid for one day. Owner only.
async fn handle_fetch_time_grid(
    AxumState(app_state): AxumState<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<TimeGridQuery>,
    headers: HeaderMap,
) -> Result<Json<TimeGridResponse>, HttpError> {
    let owner: AuthenticatedOwner = authenticate(&app_state, &headers).await?;

    info!(
        slug = %slug,
        date = %query.date,
        login_name = %owner.login_name,
        "Handling fetch_time_grid request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: TimeGridResponse =
        handlers::fetch_time_grid(&mut persistence, &slug, &query.date, &owner)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/owners", post(handle_register_owner))
        .route("/login", post(handle_login))
        .route("/logout", post(handle_logout))
        .route("/whoami", get(handle_whoami))
        .route("/plans", post(handle_create_plan))
        .route("/plans", get(handle_list_plans))
        .route("/plans/{slug}", get(handle_fetch_plan))
        .route("/plans/{slug}", patch(handle_update_plan_description))
        .route("/plans/{slug}", delete(handle_delete_plan))
        .route("/plans/{slug}/responses", post(handle_submit_response))
        .route(
            "/plans/{slug}/responses/{response_id}",
            delete(handle_delete_response),
        )
        .route("/plans/{slug}/results", get(handle_fetch_results))
        .route("/plans/{slug}/results/time-grid", get(handle_fetch_time_grid))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Muster Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
