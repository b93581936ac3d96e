//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation. Password
//!   hashing lives in `forkline_core::password` so the database layer can
//!   verify credentials too.

pub mod jwt;
