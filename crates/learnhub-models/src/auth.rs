//! Registration and login DTOs.
//!
//! Passwords in these requests are base64-encoded by the client. The encoding
//! is not encryption; it only keeps the raw password out of casual logs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use learnhub_auth::Role;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "username must be 1-64 characters"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "c2VjcmV0MTIz")]
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "c2VjcmV0MTIz")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
