pub mod admin;
pub mod auth;
pub mod health;
pub mod roles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/password                       change own password (requires auth)
///
/// /roles                               list (requires auth)
/// /roles/{id}                          get (requires auth)
///
/// /admin/users                         list, create (management only)
/// /admin/users/{id}                    get, update, deactivate
/// /admin/users/{id}/reset-password     reset password
/// /admin/seed/roles                    reconcile role grants
/// /admin/seed/users                    insert fake users
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/roles", roles::router())
        .nest("/admin", admin::router())
}
