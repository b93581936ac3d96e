//! Synthetic seed data for bootstrap and testing.

use chrono::Utc;
use rand::Rng;
use sqlx::PgPool;
use tracing::{debug, warn};

use forkline_core::password::{hash_password, PasswordHashError, PasswordPolicy};

use crate::models::user::CreateUser;
use crate::repositories::UserRepo;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    Hash(#[from] PasswordHashError),
}

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Donald", "Edsger", "Frances", "Grace", "John", "Katherine",
    "Ken", "Leslie", "Margaret", "Niklaus", "Radia", "Tony",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Hamilton", "Hoare", "Hopper", "Kay", "Knuth", "Lamport", "Liskov",
    "McCarthy", "Perlman", "Ritchie", "Shannon", "Thompson", "Turing", "Wirth",
];

/// Bulk-insert `count` fake users with randomized names.
///
/// Every fake user gets the policy's placeholder password (hashed once and
/// shared), no role, and `active = true`. Uniqueness violations on
/// username or email are logged and skipped so the run continues; any
/// other database error aborts it. Returns the number of rows actually
/// inserted. Generic over [`Rng`] so tests can drive it with a seeded
/// generator.
pub async fn seed_fake_users<R: Rng + ?Sized>(
    pool: &PgPool,
    rng: &mut R,
    count: usize,
    policy: &PasswordPolicy,
) -> Result<usize, SeedError> {
    let password_hash = hash_password(&policy.default_password)?;
    let expires_at = policy.expiry_from(Utc::now());

    let mut created = 0;
    for _ in 0..count {
        let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
        let username = format!("{}{}", first.to_lowercase(), rng.random_range(0..100u32));
        let email = format!("{}.{}@example.com", username, last.to_lowercase());

        let input = CreateUser {
            username,
            email,
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            password_hash: password_hash.clone(),
            password_expires_at: Some(expires_at),
            active: true,
            ..Default::default()
        };

        match UserRepo::create(pool, &input).await {
            Ok(user) => {
                debug!(user_id = user.id, username = %user.username, "seeded fake user");
                created += 1;
            }
            Err(err) if is_unique_violation(&err) => {
                warn!(username = %input.username, "skipping duplicate fake user");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(created)
}

/// PostgreSQL unique constraint violation: error code 23505.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
