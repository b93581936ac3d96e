//! Handlers for the `/admin` resource (user management and seeding).
//!
//! All handlers require the `management` permission via [`RequireManagement`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use forkline_core::error::CoreError;
use forkline_core::password::{hash_password, validate_password_strength};
use forkline_core::types::DbId;
use forkline_db::credentials::{self, PasswordChange};
use forkline_db::models::user::{CreateUser, UpdateUser, User, UserResponse};
use forkline_db::repositories::{RoleRepo, UserRepo};
use forkline_db::seed;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireManagement;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_id: Option<DbId>,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
///
/// Without a body password, the account is reset to the configured
/// placeholder, forcing a change at next login.
#[derive(Debug, Default, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: Option<String>,
}

/// Query parameters for `POST /admin/seed/users`.
#[derive(Debug, Deserialize)]
pub struct SeedUsersQuery {
    pub count: Option<usize>,
}

/// Response body for `POST /admin/seed/users`.
#[derive(Debug, Serialize)]
pub struct SeedUsersResponse {
    pub created: usize,
}

/// Default number of fake users inserted by the seed endpoint.
const DEFAULT_SEED_COUNT: usize = 20;

// ---------------------------------------------------------------------------
// User management
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/users
///
/// Create a new user. Validates password strength, hashes it, and returns
/// a safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireManagement(_staff): RequireManagement,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let policy = &state.config.password_policy;
    validate_password_strength(&input.password, policy.min_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        email: input.email,
        first_name: input.first_name,
        middle_initial: input.middle_initial,
        last_name: input.last_name,
        phone_number: input.phone_number,
        address: input.address,
        password_hash: hashed,
        password_expires_at: Some(policy.expiry_from(Utc::now())),
        role_id: input.role_id,
        active: true,
        ..Default::default()
    };

    let user = UserRepo::create(&state.pool, &create_dto).await?;
    let response = user_to_response(&state, &user).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/admin/users
///
/// List all users with resolved role names.
pub async fn list_users(
    State(state): State<AppState>,
    RequireManagement(_staff): RequireManagement,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;

    // Pre-fetch all roles to avoid N+1 queries.
    let roles = RoleRepo::list(&state.pool).await?;

    let responses: Vec<UserResponse> = users
        .iter()
        .map(|u| {
            let role_name = u
                .role_id
                .and_then(|id| roles.iter().find(|r| r.id == id))
                .map(|r| r.name.clone());
            u.to_response(role_name)
        })
        .collect();

    Ok(Json(responses))
}

/// GET /api/v1/admin/users/{id}
///
/// Get a single user by ID.
pub async fn get_user(
    State(state): State<AppState>,
    RequireManagement(_staff): RequireManagement,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let response = user_to_response(&state, &user).await?;
    Ok(Json(response))
}

/// PUT /api/v1/admin/users/{id}
///
/// Partially update a user (profile fields, role assignment, active flag).
pub async fn update_user(
    State(state): State<AppState>,
    RequireManagement(_staff): RequireManagement,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let response = user_to_response(&state, &user).await?;
    Ok(Json(response))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivate a user. Returns 204 No Content.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireManagement(_staff): RequireManagement,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
///
/// Install a new password through the full lifecycle (history + expiry).
/// Defaults to the configured placeholder when no password is supplied;
/// the placeholder is exempt from the strength check, an explicit value
/// is not.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireManagement(_staff): RequireManagement,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    let policy = &state.config.password_policy;
    let new_password = match input.new_password {
        Some(password) => {
            validate_password_strength(&password, policy.min_length)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            password
        }
        None => policy.default_password.clone(),
    };

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    match credentials::set_password(&state.pool, policy, &user, &new_password).await? {
        PasswordChange::Changed => Ok(StatusCode::NO_CONTENT),
        _ => Err(AppError::Core(CoreError::Conflict(
            "New password matches the current or a recently used password".into(),
        ))),
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/seed/roles
///
/// Reconcile the roles table with the canonical grants. Idempotent.
pub async fn seed_roles(
    State(state): State<AppState>,
    RequireManagement(_staff): RequireManagement,
) -> AppResult<StatusCode> {
    RoleRepo::populate(&state.pool).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/seed/users?count=N
///
/// Bulk-insert fake users, skipping uniqueness conflicts. Reports how many
/// rows were actually created.
pub async fn seed_users(
    State(state): State<AppState>,
    RequireManagement(_staff): RequireManagement,
    Query(query): Query<SeedUsersQuery>,
) -> AppResult<Json<SeedUsersResponse>> {
    let count = query.count.unwrap_or(DEFAULT_SEED_COUNT);
    let mut rng = StdRng::from_os_rng();

    let created = seed::seed_fake_users(
        &state.pool,
        &mut rng,
        count,
        &state.config.password_policy,
    )
    .await
    .map_err(|e| AppError::InternalError(format!("Seeding error: {e}")))?;

    Ok(Json(SeedUsersResponse { created }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a [`UserResponse`] with the role name resolved from the database.
async fn user_to_response(state: &AppState, user: &User) -> AppResult<UserResponse> {
    let role_name = match user.role_id {
        Some(role_id) => RoleRepo::resolve_name(&state.pool, role_id).await?,
        None => None,
    };
    Ok(user.to_response(role_name))
}
