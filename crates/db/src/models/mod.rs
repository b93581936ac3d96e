//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row, plus the create/update DTOs used by its repository.

pub mod password_history;
pub mod role;
pub mod user;
