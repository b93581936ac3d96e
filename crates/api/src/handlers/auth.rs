//! Handlers for the `/auth` resource (register, login, password change).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use forkline_core::error::CoreError;
use forkline_core::password::{hash_password, validate_password_strength, verify_password};
use forkline_core::permissions::PermissionSet;
use forkline_core::roles::ROLE_CUSTOMER;
use forkline_core::types::DbId;
use forkline_db::credentials::{self, PasswordChange};
use forkline_db::models::user::{CreateUser, User, UserResponse};
use forkline_db::repositories::{RoleRepo, UserRepo};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub middle_initial: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    /// The password is expired or still the placeholder; the client should
    /// force a reset before anything else.
    pub must_change_password: bool,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: Option<String>,
    /// Raw permission mask of the assigned role.
    pub permissions: i64,
}

/// Request body for `POST /auth/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Response body for `POST /auth/password`.
#[derive(Debug, Serialize)]
pub struct ChangePasswordResponse {
    pub changed: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Public registration. Validates password strength, hashes it, assigns the
/// customer role, and returns a safe [`UserResponse`] with 201 Created.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let policy = &state.config.password_policy;
    validate_password_strength(&input.password, policy.min_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let customer = RoleRepo::find_by_name(&state.pool, ROLE_CUSTOMER)
        .await?
        .ok_or_else(|| {
            AppError::InternalError("Customer role missing; roles not populated".to_string())
        })?;

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
        role_id: Some(customer.id),
        active: true,
        ..Default::default()
    };

    let user = UserRepo::create(&state.pool, &create_dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(user.to_response(Some(customer.name))),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns an access token carrying
/// the resolved role and permission mask.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find user by username.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    // 2. Check if the account is active.
    if !user.active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 3. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    // 4. Flag expired or placeholder credentials for a forced reset.
    let must_change_password =
        credentials::has_invalid_password(&user, &state.config.password_policy)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    // 5. Resolve role name and permission mask for the JWT claims.
    let (role_name, permissions) = resolve_role(&state, &user).await?;

    // 6. Generate the token.
    let access_token =
        generate_access_token(user.id, role_name.as_deref(), permissions, &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        must_change_password,
        user: UserInfo {
            id: user.id,
            username: user.username,
            email: user.email,
            role: role_name,
            permissions: permissions.bits(),
        },
    }))
}

/// POST /api/v1/auth/password
///
/// Change the authenticated user's password. The current password must
/// verify; a wrong one changes nothing and reports `"changed": false`.
/// Reusing the current or a retained previous password is a 409.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<ChangePasswordResponse>> {
    let policy = &state.config.password_policy;
    validate_password_strength(&input.new_password, policy.min_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "User",
                id: auth_user.user_id,
            })
        })?;

    let outcome = credentials::update_password(
        &state.pool,
        policy,
        &user,
        &input.current_password,
        &input.new_password,
    )
    .await?;

    match outcome {
        PasswordChange::Changed => Ok(Json(ChangePasswordResponse { changed: true })),
        PasswordChange::WrongCurrent => Ok(Json(ChangePasswordResponse { changed: false })),
        PasswordChange::Reused => Err(AppError::Core(CoreError::Conflict(
            "New password matches the current or a recently used password".into(),
        ))),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a user's role name and permission mask; roleless users get an
/// empty mask.
async fn resolve_role(
    state: &AppState,
    user: &User,
) -> AppResult<(Option<String>, PermissionSet)> {
    match user.role_id {
        Some(role_id) => match RoleRepo::find_by_id(&state.pool, role_id).await? {
            Some(role) => {
                let mask = role.permission_set();
                Ok((Some(role.name), mask))
            }
            None => Ok((None, PermissionSet::EMPTY)),
        },
        None => Ok((None, PermissionSet::EMPTY)),
    }
}
