//! Request handlers.
//!
//! Handlers delegate to the repositories and the password lifecycle in
//! `forkline_db` and map errors via [`crate::error::AppError`].

pub mod admin;
pub mod auth;
pub mod roles;
