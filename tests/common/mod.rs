#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use learnhub::learnhub_auth::{Role, issue_token};
use learnhub::learnhub_config::{CorsConfig, JwtConfig, StorageConfig};
use learnhub::learnhub_core::hash_password;
use learnhub::router::init_router;
use learnhub::state::AppState;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Plain password every test user is created with.
pub const TEST_PASSWORD: &str = "secret123";
/// `TEST_PASSWORD` in its base64 transport encoding.
pub const TEST_PASSWORD_B64: &str = "c2VjcmV0MTIz";

pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 3600,
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    let storage_config = StorageConfig {
        base_dir: temp_media_dir(),
        public_url: "http://localhost:3000/media".to_string(),
        max_upload_bytes: 1024 * 1024,
    };

    AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        storage_config,
    )
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

pub fn temp_media_dir() -> PathBuf {
    std::env::temp_dir().join(format!("learnhub-test-media-{}", Uuid::new_v4()))
}

pub fn generate_unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

pub async fn create_test_user(pool: &PgPool, prefix: &str, role: Role) -> TestUser {
    let username = generate_unique_username(prefix);
    let email = format!("{}@example.com", username);
    let (hash, salt) = hash_password(TEST_PASSWORD).unwrap();

    let id: Uuid = sqlx::query_scalar(
        r#"INSERT INTO users (username, email, password, salt, role)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id"#,
    )
    .bind(&username)
    .bind(&email)
    .bind(&hash)
    .bind(&salt)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    let token = issue_token(id, role, &test_jwt_config()).unwrap();

    TestUser {
        id,
        username,
        email,
        role,
        token,
    }
}

pub async fn create_test_course(pool: &PgPool, owner_id: Uuid, name: &str) -> Uuid {
    sqlx::query_scalar(
        r#"INSERT INTO courses (name, description, manager_user_id)
           VALUES ($1, 'Test course', $2)
           RETURNING id"#,
    )
    .bind(name)
    .bind(owner_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder.body(Body::empty()).unwrap()
}

/// Sends one request and returns the status and the JSON body (`Null` if empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };

    (status, json)
}
