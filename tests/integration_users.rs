mod common;

use axum::http::StatusCode;
use common::{
    create_test_user, empty_request, json_request, send, setup_test_app, test_jwt_config,
};
use learnhub::learnhub_auth::{Role, issue_token};
use learnhub::learnhub_core::verify_password;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_get_profile_hides_credentials(pool: PgPool) {
    let user = create_test_user(&pool, "profile", Role::Learner).await;
    let app = setup_test_app(pool.clone());

    let (status, body) = send(&app, empty_request("GET", "/api/user/me", Some(&user.token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user.id.to_string());
    assert_eq!(body["username"], user.username);
    assert_eq!(body["role"], "learner");
    assert!(body.get("password").is_none());
    assert!(body.get("salt").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_profile_without_token(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(&app, empty_request("GET", "/api/user/me", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_profile_with_garbage_token(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        empty_request("GET", "/api/user/me", Some("not.a.token")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_profile_for_deleted_user(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let token = issue_token(Uuid::new_v4(), Role::Learner, &test_jwt_config()).unwrap();

    let (status, _) = send(&app, empty_request("GET", "/api/user/me", Some(&token))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_username(pool: PgPool) {
    let user = create_test_user(&pool, "rename", Role::Educator).await;
    let other = create_test_user(&pool, "other", Role::Learner).await;
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/user/update-username",
            Some(&user.token),
            json!({ "username": other.username }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/user/update-username",
            Some(&user.token),
            json!({ "username": "renamed_user" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Username updated successfully");

    let username: String = sqlx::query_scalar("SELECT username FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(username, "renamed_user");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_password_then_login(pool: PgPool) {
    let user = create_test_user(&pool, "repass", Role::Learner).await;
    let app = setup_test_app(pool.clone());

    // "brand-new-pass"
    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/api/user/update-password",
            Some(&user.token),
            json!({ "password": "YnJhbmQtbmV3LXBhc3M=" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let hash: String = sqlx::query_scalar("SELECT password FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(verify_password("brand-new-pass", &hash).unwrap());

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": user.username, "password": "YnJhbmQtbmV3LXBhc3M=" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
