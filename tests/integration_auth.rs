mod common;

use axum::http::StatusCode;
use common::{
    TEST_PASSWORD_B64, count_rows, create_test_user, json_request, send, setup_test_app,
    test_jwt_config,
};
use learnhub::learnhub_auth::{Role, verify_token};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_returns_token_with_role(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": TEST_PASSWORD_B64,
                "role": "educator"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let token = body["token"].as_str().unwrap();
    let claims = verify_token(token, &test_jwt_config()).unwrap();
    assert_eq!(claims.role, Role::Educator);

    let user_id = Uuid::parse_str(&claims.sub).unwrap();
    let email: String = sqlx::query_scalar("SELECT email FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(email, "alice@example.com");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email_or_username(pool: PgPool) {
    let existing = create_test_user(&pool, "taken", Role::Learner).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "username": "someone_new",
                "email": existing.email,
                "password": TEST_PASSWORD_B64,
                "role": "learner"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "username": existing.username,
                "email": "fresh@example.com",
                "password": TEST_PASSWORD_B64,
                "role": "learner"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(count_rows(&pool, "users").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_rejects_unknown_role(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "username": "eve",
                "email": "eve@example.com",
                "password": TEST_PASSWORD_B64,
                "role": "admin"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(count_rows(&pool, "users").await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_rejects_password_that_is_not_base64(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "username": "eve",
                "email": "eve@example.com",
                "password": "not base64!",
                "role": "learner"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be base64-encoded");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_missing_field(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "username": "eve",
                "password": TEST_PASSWORD_B64,
                "role": "learner"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_test_user(&pool, "login", Role::Learner).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": user.username, "password": TEST_PASSWORD_B64 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let claims = verify_token(body["token"].as_str().unwrap(), &test_jwt_config()).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.role, Role::Learner);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let user = create_test_user(&pool, "login", Role::Learner).await;
    let app = setup_test_app(pool.clone());

    // "wrongpass"
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": user.username, "password": "d3JvbmdwYXNz" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid username or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_username(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": "ghost", "password": TEST_PASSWORD_B64 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid username or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_then_login_roundtrip(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({
                "username": "bob",
                "email": "bob@example.com",
                "password": TEST_PASSWORD_B64,
                "role": "learner"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": "bob", "password": TEST_PASSWORD_B64 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_bad_encoding_does_not_reveal_username(pool: PgPool) {
    let user = create_test_user(&pool, "known", Role::Learner).await;
    let app = setup_test_app(pool.clone());

    let (known_status, known_body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": user.username, "password": "not base64!" }),
        ),
    )
    .await;

    let (unknown_status, unknown_body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": "nobody_here", "password": "not base64!" }),
        ),
    )
    .await;

    assert_eq!(known_status, StatusCode::BAD_REQUEST);
    assert_eq!(known_status, unknown_status);
    assert_eq!(known_body, unknown_body);
}
