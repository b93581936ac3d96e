//! Retained prior password hashes, bounded per user.

use forkline_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `password_history` table.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordHistory {
    pub id: DbId,
    pub user_id: DbId,
    pub password_hash: String,
    pub created_at: Timestamp,
}
