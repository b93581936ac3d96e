//! Repository for the `users` table.

use forkline_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, first_name, middle_initial, last_name, \
                        phone_number, address, password_hash, password_expires_at, \
                        role_id, active, stars, salary, commission, credit_card, \
                        cv, ctype, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, first_name, middle_initial, last_name,
                                phone_number, address, password_hash, password_expires_at,
                                role_id, active, stars, salary, commission, credit_card,
                                cv, ctype)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.middle_initial)
            .bind(&input.last_name)
            .bind(&input.phone_number)
            .bind(&input.address)
            .bind(&input.password_hash)
            .bind(input.password_expires_at)
            .bind(input.role_id)
            .bind(input.active)
            .bind(input.stars)
            .bind(input.salary)
            .bind(input.commission)
            .bind(input.credit_card)
            .bind(input.cv)
            .bind(&input.ctype)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                first_name = COALESCE($4, first_name),
                middle_initial = COALESCE($5, middle_initial),
                last_name = COALESCE($6, last_name),
                phone_number = COALESCE($7, phone_number),
                address = COALESCE($8, address),
                role_id = COALESCE($9, role_id),
                active = COALESCE($10, active),
                stars = COALESCE($11, stars),
                salary = COALESCE($12, salary),
                commission = COALESCE($13, commission),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.middle_initial)
            .bind(&input.last_name)
            .bind(&input.phone_number)
            .bind(&input.address)
            .bind(input.role_id)
            .bind(input.active)
            .bind(input.stars)
            .bind(input.salary)
            .bind(input.commission)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a user by setting `active = false`.
    ///
    /// Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET active = false, updated_at = NOW()
             WHERE id = $1 AND active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Store a new password hash and its expiry. Returns `true` if the row
    /// was updated. Executor-generic so the caller can pair it with the
    /// history push in one transaction.
    pub async fn update_password(
        executor: impl sqlx::PgExecutor<'_>,
        id: DbId,
        password_hash: &str,
        expires_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, password_expires_at = $3, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .bind(expires_at)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
