//! Handlers for the `/roles` resource (read-only).

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use forkline_core::error::CoreError;
use forkline_core::types::DbId;
use forkline_db::models::role::Role;
use forkline_db::repositories::RoleRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// A role with its permission mask spelled out by name.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub id: DbId,
    pub name: String,
    /// Raw permission mask.
    pub permissions: i64,
    /// Wire names of the granted bits, in declaration order.
    pub permission_names: Vec<&'static str>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        let names = role.permission_set().names();
        Self {
            id: role.id,
            name: role.name,
            permissions: role.permissions,
            permission_names: names,
        }
    }
}

/// GET /api/v1/roles
///
/// List all roles with their grants.
pub async fn list_roles(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<RoleResponse>>> {
    let roles = RoleRepo::list(&state.pool).await?;
    Ok(Json(roles.into_iter().map(RoleResponse::from).collect()))
}

/// GET /api/v1/roles/{id}
///
/// Get a single role by ID.
pub async fn get_role(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<RoleResponse>> {
    let role = RoleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Role", id }))?;
    Ok(Json(role.into()))
}
