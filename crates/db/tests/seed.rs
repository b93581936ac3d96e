//! Integration tests for the fake-user seeder's continue-on-conflict policy.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::PgPool;

use forkline_core::password::{verify_password, PasswordPolicy};
use forkline_db::repositories::UserRepo;
use forkline_db::seed::seed_fake_users;

/// Seeding inserts users that carry the placeholder password and no role.
#[sqlx::test(migrations = "../../migrations")]
async fn seed_creates_roleless_placeholder_users(pool: PgPool) {
    let policy = PasswordPolicy::default();
    let mut rng = StdRng::seed_from_u64(42);

    let created = seed_fake_users(&pool, &mut rng, 10, &policy).await.unwrap();
    assert!(created > 0, "a fresh database must accept at least one user");

    let users = UserRepo::list(&pool).await.unwrap();
    assert_eq!(users.len(), created);
    for user in users {
        assert!(user.role_id.is_none(), "fake users must not hold a role");
        assert!(user.active);
        assert!(verify_password(&policy.default_password, &user.password_hash).unwrap());
    }
}

/// Replaying the same random sequence hits only duplicates: every conflict
/// is skipped, the run still succeeds, and no extra rows appear.
#[sqlx::test(migrations = "../../migrations")]
async fn seed_skips_duplicates_and_continues(pool: PgPool) {
    let policy = PasswordPolicy::default();

    let mut rng = StdRng::seed_from_u64(7);
    let first = seed_fake_users(&pool, &mut rng, 10, &policy).await.unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let second = seed_fake_users(&pool, &mut rng, 10, &policy).await.unwrap();

    assert_eq!(second, 0, "an identical replay must insert nothing");
    assert_eq!(UserRepo::list(&pool).await.unwrap().len(), first);
}
