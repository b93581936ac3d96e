//! Permission-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose permission
//! mask does not cover the required bits. Use these in route handlers to
//! enforce authorization at the type level; [`require`] covers ad-hoc
//! checks inside a handler body.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use forkline_core::error::CoreError;
use forkline_core::permissions::PermissionSet;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Rejects with 403 Forbidden unless the user's role covers `required`.
pub fn require(user: &AuthUser, required: PermissionSet) -> Result<(), AppError> {
    if !user.can(required) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Missing permission: {required}"
        ))));
    }
    Ok(())
}

/// Requires the `management` permission bit. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn staff_only(RequireManagement(user): RequireManagement) -> AppResult<Json<()>> {
///     // user's role is guaranteed to hold the management bit here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireManagement(pub AuthUser);

impl FromRequestParts<AppState> for RequireManagement {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        require(&user, PermissionSet::MANAGEMENT)?;
        Ok(RequireManagement(user))
    }
}

/// Requires any authenticated user (with or without a role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
///
/// ```ignore
/// async fn any_authed(RequireAuth(user): RequireAuth) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
