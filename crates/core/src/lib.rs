//! Domain core for the Forkline food-ordering platform.
//!
//! Pure logic only, no I/O: the permission registry, the canonical
//! role-grant table, password hashing and lifecycle policy, and the
//! error/type definitions shared by the database and API crates.

pub mod error;
pub mod password;
pub mod permissions;
pub mod roles;
pub mod types;
