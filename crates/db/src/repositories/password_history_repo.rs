//! Repository for the `password_history` table.

use forkline_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::password_history::PasswordHistory;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, password_hash, created_at";

/// Provides access to the bounded per-user password history.
pub struct PasswordHistoryRepo;

impl PasswordHistoryRepo {
    /// All retained hashes for a user, oldest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PasswordHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM password_history
             WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, PasswordHistory>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Number of retained hashes for a user.
    pub async fn count_for_user(
        executor: impl sqlx::PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM password_history WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(executor)
                .await?;
        Ok(count.0)
    }

    /// Record `password_hash` for the user, evicting the oldest entries so
    /// at most `max` rows remain afterwards. A non-positive `max` retains
    /// nothing.
    ///
    /// Takes a connection so the caller can run the push and the matching
    /// hash update inside one transaction; rolling that transaction back
    /// undoes the push and any eviction.
    pub async fn push_bounded(
        conn: &mut PgConnection,
        user_id: DbId,
        password_hash: &str,
        max: i64,
    ) -> Result<(), sqlx::Error> {
        if max <= 0 {
            return Ok(());
        }
        let count = Self::count_for_user(&mut *conn, user_id).await?;
        if count >= max {
            sqlx::query(
                "DELETE FROM password_history WHERE id IN (
                     SELECT id FROM password_history
                     WHERE user_id = $1
                     ORDER BY created_at ASC, id ASC
                     LIMIT $2)",
            )
            .bind(user_id)
            .bind(count - max + 1)
            .execute(&mut *conn)
            .await?;
        }
        sqlx::query("INSERT INTO password_history (user_id, password_hash) VALUES ($1, $2)")
            .bind(user_id)
            .bind(password_hash)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
