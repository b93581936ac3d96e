//! Repository for the `roles` table.

use forkline_core::roles::default_grants;
use forkline_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::Role;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, permissions, created_at, updated_at";

/// Provides read and reconciliation operations for roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by name (case-sensitive).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY id ASC");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Resolve a role ID to its name, returning `None` if the ID is missing.
    pub async fn resolve_name(
        pool: &PgPool,
        role_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        Ok(Self::find_by_id(pool, role_id).await?.map(|r| r.name))
    }

    /// Reconcile the `roles` table with the canonical grants from
    /// [`default_grants`].
    ///
    /// Creates missing roles by name and resets the permission mask of
    /// existing ones. Runs inside a single transaction: a mid-way failure
    /// leaves no partial role state. Running it twice yields the same rows.
    pub async fn populate(pool: &PgPool) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for (name, grant) in default_grants() {
            sqlx::query(
                "INSERT INTO roles (name, permissions) VALUES ($1, $2)
                 ON CONFLICT (name) DO UPDATE
                     SET permissions = EXCLUDED.permissions, updated_at = NOW()",
            )
            .bind(name)
            .bind(grant.bits())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        tracing::info!(roles = default_grants().len(), "Role grants reconciled");
        Ok(())
    }
}
