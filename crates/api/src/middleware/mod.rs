//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.
//! - [`rbac::RequireManagement`] -- Requires the `management` permission bit.
//! - [`rbac::require`] -- Ad-hoc permission-mask check inside a handler.

pub mod auth;
pub mod rbac;
