//! Argon2id password hashing and the credential lifecycle policy.
//!
//! Hashes use the Argon2id variant with a cryptographically random salt
//! from [`OsRng`], stored in PHC string format so algorithm parameters and
//! salt travel with the hash. Verification is strictly one-way; stored
//! hashes are never decoded or compared as text.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Duration;

use crate::types::Timestamp;

pub use argon2::password_hash::Error as PasswordHashError;

/// Hash a plaintext password with Argon2id and a fresh random salt.
///
/// Returns the PHC-formatted hash string.
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id, default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext candidate against a stored PHC-formatted hash.
///
/// Returns `Ok(true)` on a match, `Ok(false)` on a mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordHashError> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Validate that a password meets minimum strength requirements.
///
/// Currently enforces a minimum character length. Returns `Err` with a
/// human-readable explanation when the password is too weak.
pub fn validate_password_strength(password: &str, min_length: usize) -> Result<(), String> {
    if password.len() < min_length {
        return Err(format!(
            "Password must be at least {min_length} characters long"
        ));
    }
    Ok(())
}

/// Site-wide credential policy: bounded reuse history, a fixed validity
/// window, and the placeholder password that forces a first-login reset.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Maximum retained prior hashes per user; oldest evicted first.
    pub max_history: i64,
    /// Days a freshly set password remains valid.
    pub validity_days: i64,
    /// Minimum password length accepted on set/registration.
    pub min_length: usize,
    /// Placeholder credential assigned before a user's first login.
    pub default_password: String,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            max_history: 3,
            validity_days: 90,
            min_length: 12,
            default_password: "changeme".to_string(),
        }
    }
}

impl PasswordPolicy {
    /// Expiration timestamp for a password set at `now`.
    pub fn expiry_from(&self, now: Timestamp) -> Timestamp {
        now + Duration::days(self.validity_days)
    }
}
