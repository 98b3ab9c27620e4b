//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    Json,
};
use uuid::Uuid;

use super::dto::{
    AddCourseRequest, CartCheckRequest, CartCheckResponse, CourseListResponse, HealthResponse,
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, SaveScheduleRequest,
    ScheduleResponse, UserDto,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::CourseId;
use crate::services::{account, auth};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Extract and verify the bearer token, returning its claims.
fn bearer_claims(state: &AppState, headers: &HeaderMap) -> Result<auth::Claims, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Expected a bearer token".to_string()))?;

    Ok(auth::verify_token(&state.jwt_secret, token)?)
}

/// Authenticated user id from the bearer token.
fn authenticated_user(state: &AppState, headers: &HeaderMap) -> Result<Uuid, AppError> {
    let claims = bearer_claims(state, headers)?;
    claims
        .sub
        .parse()
        .map_err(|_| AppError::Unauthorized("Malformed token subject".to_string()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Catalog
// =============================================================================

/// GET /v1/courses
///
/// List the full course catalog in stored order.
pub async fn list_courses(State(state): State<AppState>) -> HandlerResult<CourseListResponse> {
    let courses = state.repository.list_courses().await?;
    let total = courses.len();

    Ok(Json(CourseListResponse { courses, total }))
}

// =============================================================================
// Accounts
// =============================================================================

/// POST /v1/auth/register
///
/// Create a new account with an empty schedule.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> HandlerResult<RegisterResponse> {
    account::register(state.repository.as_ref(), &request.username, &request.password).await?;

    Ok(Json(RegisterResponse {
        message: "Registration successful".to_string(),
    }))
}

/// POST /v1/auth/login
///
/// Verify credentials and return an access token plus the persisted schedule.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> HandlerResult<LoginResponse> {
    let outcome = account::login(
        state.repository.as_ref(),
        &state.jwt_secret,
        &request.username,
        &request.password,
    )
    .await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        user: UserDto::from(outcome.user),
    }))
}

// =============================================================================
// Persisted Schedule
// =============================================================================

/// GET /v1/schedule
///
/// Fetch the authenticated user's persisted schedule.
pub async fn get_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> HandlerResult<ScheduleResponse> {
    let user_id = authenticated_user(&state, &headers)?;
    let schedule = account::fetch_schedule(state.repository.as_ref(), user_id).await?;

    Ok(Json(ScheduleResponse::new(schedule)))
}

/// PUT /v1/schedule
///
/// Replace the authenticated user's persisted schedule wholesale.
///
/// This endpoint trusts the client's cart, matching the upstream
/// save-schedule behavior; the server-authoritative path is
/// `POST /v1/schedule/courses`.
pub async fn save_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SaveScheduleRequest>,
) -> HandlerResult<ScheduleResponse> {
    let user_id = authenticated_user(&state, &headers)?;
    account::save_schedule(state.repository.as_ref(), user_id, request.cart.clone()).await?;

    Ok(Json(ScheduleResponse::new(request.cart)))
}

/// POST /v1/schedule/courses
///
/// Add a catalog course to the stored schedule through the admission gate.
/// The read-modify-write runs atomically inside the repository, so
/// concurrent adds for the same user serialize; rejection leaves the stored
/// schedule unmodified.
pub async fn add_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AddCourseRequest>,
) -> HandlerResult<ScheduleResponse> {
    let user_id = authenticated_user(&state, &headers)?;

    let candidate = state.repository.get_course(request.course_id).await?;
    let next = account::add_course(
        state.repository.as_ref(),
        &state.policy,
        user_id,
        &candidate,
    )
    .await?;

    Ok(Json(ScheduleResponse::new(next)))
}

/// DELETE /v1/schedule/courses/{course_id}
///
/// Remove a course from the stored schedule. Removal is unconditional and
/// runs atomically inside the repository.
pub async fn remove_course(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(course_id): Path<i64>,
) -> HandlerResult<ScheduleResponse> {
    let user_id = authenticated_user(&state, &headers)?;

    let next = account::remove_course(
        state.repository.as_ref(),
        &state.policy,
        user_id,
        CourseId::new(course_id),
    )
    .await?;

    Ok(Json(ScheduleResponse::new(next)))
}

// =============================================================================
// Admission Check
// =============================================================================

/// POST /v1/cart/check
///
/// Run the admission gate as a pure query, without mutating anything. The
/// cart defaults to the authenticated user's stored schedule when not
/// supplied in the request.
pub async fn check_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CartCheckRequest>,
) -> HandlerResult<CartCheckResponse> {
    let user_id = authenticated_user(&state, &headers)?;

    let cart = match request.cart {
        Some(cart) => cart,
        None => account::fetch_schedule(state.repository.as_ref(), user_id).await?,
    };

    let response = match state.policy.admit(&request.candidate, &cart) {
        Ok(()) => CartCheckResponse::admitted(),
        Err(rejection) => CartCheckResponse::rejected(rejection),
    };

    Ok(Json(response))
}
