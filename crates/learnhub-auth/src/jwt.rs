//! Token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`] and carrying the
//! user id and role. Verification checks signature, shape, and expiry only;
//! there is no revocation list, so a role change takes effect when the
//! holder obtains a new token.
//!
//! # Example
//!
//! ```ignore
//! use learnhub_auth::{Role, issue_token, verify_token};
//! use learnhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = issue_token(user_id, Role::Educator, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, Role::Educator);
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use learnhub_config::JwtConfig;
use learnhub_core::AppError;

use crate::claims::{Claims, Role};

/// Issues a signed token for `user_id` with the configured lifetime.
pub fn issue_token(user_id: Uuid, role: Role, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let ttl = usize::try_from(jwt_config.token_expiry).unwrap_or(0);
    let exp = now.saturating_add(ttl);

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies a token and returns its claims.
///
/// Any failure (bad signature, malformed, expired) is reported as
/// unauthorized without saying which.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            token_expiry: 86400,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = issue_token(user_id, Role::Learner, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Learner);
        assert_eq!(claims.exp - claims.iat, 86400);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        let err = verify_token("invalid-token", &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = issue_token(Uuid::new_v4(), Role::Educator, &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            token_expiry: 86400,
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_token_expired() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: Role::Educator,
            // well past the default 60s leeway
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_issue_token_with_negative_expiry_does_not_overflow() {
        let config = JwtConfig {
            token_expiry: -1,
            ..get_test_jwt_config()
        };
        let token = issue_token(Uuid::new_v4(), Role::Learner, &config).unwrap();

        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &Validation::default(),
        )
        .unwrap()
        .claims;
        assert_eq!(claims.exp, claims.iat);

        let config = JwtConfig {
            token_expiry: i64::MAX,
            ..get_test_jwt_config()
        };
        assert!(issue_token(Uuid::new_v4(), Role::Learner, &config).is_ok());
    }
}
