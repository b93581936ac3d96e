//! Password lifecycle over the `users` and `password_history` tables.
//!
//! Reuse detection is strictly one-way: the candidate plaintext is
//! verified against each stored hash; hashes are never decoded or compared
//! as text. The flows here are check-then-set under the single-writer
//! assumption of a synchronous request cycle; row-level isolation in the
//! store covers concurrent mutation of unrelated users.

use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;

use forkline_core::password::{
    hash_password, verify_password, PasswordHashError, PasswordPolicy,
};
use forkline_core::types::DbId;

use crate::models::user::User;
use crate::repositories::{PasswordHistoryRepo, UserRepo};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    Hash(#[from] PasswordHashError),

    #[error("user not found: {0}")]
    UnknownUser(DbId),
}

/// Outcome of a password set/update attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordChange {
    Changed,
    /// Candidate matched the current or a retained previous password.
    Reused,
    /// Supplied current password did not verify; nothing was changed.
    WrongCurrent,
}

/// True when `candidate` matches neither the user's current password nor
/// any retained previous one.
pub async fn is_new_password(
    pool: &PgPool,
    user: &User,
    candidate: &str,
) -> Result<bool, CredentialError> {
    if verify_password(candidate, &user.password_hash)? {
        return Ok(false);
    }
    for entry in PasswordHistoryRepo::list_for_user(pool, user.id).await? {
        if verify_password(candidate, &entry.password_hash)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Install a new password for the user.
///
/// Returns [`PasswordChange::Reused`] without touching any state when the
/// candidate matches the current password or a retained previous one. On
/// success the outgoing hash is pushed into the bounded history (oldest
/// entry evicted at capacity), the new Argon2id hash is stored, and the
/// expiry timestamp is refreshed from the policy window. The history push
/// and the hash update commit in one transaction: if either fails, no
/// history entry appears and no old entry is evicted.
pub async fn set_password(
    pool: &PgPool,
    policy: &PasswordPolicy,
    user: &User,
    new_password: &str,
) -> Result<PasswordChange, CredentialError> {
    if !is_new_password(pool, user, new_password).await? {
        debug!(user_id = user.id, "rejected reused password");
        return Ok(PasswordChange::Reused);
    }

    let hash = hash_password(new_password)?;
    let expires_at = policy.expiry_from(Utc::now());

    let mut tx = pool.begin().await?;
    PasswordHistoryRepo::push_bounded(&mut tx, user.id, &user.password_hash, policy.max_history)
        .await?;
    if !UserRepo::update_password(&mut *tx, user.id, &hash, expires_at).await? {
        return Err(CredentialError::UnknownUser(user.id));
    }
    tx.commit().await?;

    debug!(user_id = user.id, "password changed");
    Ok(PasswordChange::Changed)
}

/// Change the password only when `current` proves knowledge of the existing
/// credential. A wrong current password leaves all state untouched and
/// returns [`PasswordChange::WrongCurrent`].
pub async fn update_password(
    pool: &PgPool,
    policy: &PasswordPolicy,
    user: &User,
    current: &str,
    new_password: &str,
) -> Result<PasswordChange, CredentialError> {
    if !verify_password(current, &user.password_hash)? {
        return Ok(PasswordChange::WrongCurrent);
    }
    set_password(pool, policy, user, new_password).await
}

/// True when the password can no longer be used for a normal login: the
/// validity window has lapsed, or the stored credential still verifies
/// against the configured default placeholder (forces a first-login reset).
pub fn has_invalid_password(
    user: &User,
    policy: &PasswordPolicy,
) -> Result<bool, PasswordHashError> {
    if let Some(expires_at) = user.password_expires_at {
        if Utc::now() > expires_at {
            return Ok(true);
        }
    }
    verify_password(&policy.default_password, &user.password_hash)
}
