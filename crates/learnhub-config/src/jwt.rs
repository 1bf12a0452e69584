use std::env;

use crate::env_or;

/// Tokens live for 24 hours unless `JWT_EXPIRY` says otherwise.
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            token_expiry: positive_or_default(env_or("JWT_EXPIRY", DEFAULT_TOKEN_EXPIRY_SECS)),
        }
    }
}

/// A zero or negative lifetime would mint tokens that are born expired.
fn positive_or_default(secs: i64) -> i64 {
    if secs > 0 {
        secs
    } else {
        DEFAULT_TOKEN_EXPIRY_SECS
    }
}
