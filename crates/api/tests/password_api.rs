mod common;

use axum::http::StatusCode;
use serde_json::json;

#[sqlx::test(migrations = "../../migrations")]
async fn change_password_rotates_credentials(pool: sqlx::PgPool) {
    common::seed_roles(&pool).await;
    common::create_user_with_role(&pool, "alice", "first secret phrase", Some("customer")).await;

    let token = common::login_token(common::build_test_app(pool.clone()), "alice", "first secret phrase").await;

    let response = common::post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/password",
        &token,
        json!({
            "current_password": "first secret phrase",
            "new_password": "second secret phrase"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["changed"], json!(true));

    // old credentials are gone, new ones work
    let old_login = common::post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/login",
        json!({ "username": "alice", "password": "first secret phrase" }),
    )
    .await;
    assert_eq!(old_login.status(), StatusCode::UNAUTHORIZED);

    common::login_user(common::build_test_app(pool), "alice", "second secret phrase").await;
}

#[sqlx::test(migrations = "../../migrations")]
async fn change_password_rejects_reuse_of_current(pool: sqlx::PgPool) {
    common::seed_roles(&pool).await;
    common::create_user_with_role(&pool, "alice", "first secret phrase", Some("customer")).await;

    let token = common::login_token(common::build_test_app(pool.clone()), "alice", "first secret phrase").await;

    let response = common::post_json_auth(
        common::build_test_app(pool),
        "/api/v1/auth/password",
        &token,
        json!({
            "current_password": "first secret phrase",
            "new_password": "first secret phrase"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../migrations")]
async fn change_password_rejects_retained_previous(pool: sqlx::PgPool) {
    common::seed_roles(&pool).await;
    common::create_user_with_role(&pool, "alice", "first secret phrase", Some("customer")).await;

    let token = common::login_token(common::build_test_app(pool.clone()), "alice", "first secret phrase").await;

    let response = common::post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/password",
        &token,
        json!({
            "current_password": "first secret phrase",
            "new_password": "second secret phrase"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // the first password is now in history and cannot come back
    let response = common::post_json_auth(
        common::build_test_app(pool),
        "/api/v1/auth/password",
        &token,
        json!({
            "current_password": "second secret phrase",
            "new_password": "first secret phrase"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../migrations")]
async fn change_password_with_wrong_current_is_a_silent_noop(pool: sqlx::PgPool) {
    common::seed_roles(&pool).await;
    common::create_user_with_role(&pool, "alice", "first secret phrase", Some("customer")).await;

    let token = common::login_token(common::build_test_app(pool.clone()), "alice", "first secret phrase").await;

    let response = common::post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/password",
        &token,
        json!({
            "current_password": "not the right phrase",
            "new_password": "second secret phrase"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["changed"], json!(false));

    // nothing changed; the original password still logs in
    common::login_user(common::build_test_app(pool), "alice", "first secret phrase").await;
}

#[sqlx::test(migrations = "../../migrations")]
async fn change_password_rejects_short_new_password(pool: sqlx::PgPool) {
    common::seed_roles(&pool).await;
    common::create_user_with_role(&pool, "alice", "first secret phrase", Some("customer")).await;

    let token = common::login_token(common::build_test_app(pool.clone()), "alice", "first secret phrase").await;

    let response = common::post_json_auth(
        common::build_test_app(pool),
        "/api/v1/auth/password",
        &token,
        json!({
            "current_password": "first secret phrase",
            "new_password": "short"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn change_password_requires_authentication(pool: sqlx::PgPool) {
    let response = common::post_json(
        common::build_test_app(pool),
        "/api/v1/auth/password",
        json!({
            "current_password": "first secret phrase",
            "new_password": "second secret phrase"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn placeholder_flag_clears_after_password_change(pool: sqlx::PgPool) {
    common::seed_roles(&pool).await;
    common::create_user_with_role(&pool, "newhire", "changeme", Some("cook")).await;

    let login = common::login_user(common::build_test_app(pool.clone()), "newhire", "changeme").await;
    assert_eq!(login["must_change_password"], json!(true));
    let token = login["access_token"].as_str().unwrap().to_string();

    let response = common::post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/password",
        &token,
        json!({
            "current_password": "changeme",
            "new_password": "a proper password now"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let login =
        common::login_user(common::build_test_app(pool), "newhire", "a proper password now").await;
    assert_eq!(login["must_change_password"], json!(false));
}
