use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use learnhub_auth::{Claims, Role, verify_token};
use learnhub_core::AppError;

use crate::state::AppState;

/// Extractor that validates the bearer token and exposes its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.0.role == role
    }

    /// Get the user ID as UUID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    /// Fails with 403 unless the caller is `owner_id`.
    pub fn ensure_owner(&self, owner_id: Uuid) -> Result<(), AppError> {
        if self.user_id()? != owner_id {
            return Err(AppError::forbidden(
                "Access denied. You do not own this resource.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pulls the token out of an `Authorization` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = bearer_token(auth_header).ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn auth_user(user_id: Uuid, role: Role) -> AuthUser {
        AuthUser(Claims {
            sub: user_id.to_string(),
            role,
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_user_id() {
        let user_id = Uuid::new_v4();
        assert_eq!(auth_user(user_id, Role::Learner).user_id().unwrap(), user_id);
    }

    #[test]
    fn test_user_id_rejects_garbage_subject() {
        let user = AuthUser(Claims {
            sub: "not-a-uuid".to_string(),
            role: Role::Educator,
            exp: 9999999999,
            iat: 1234567890,
        });
        assert_eq!(user.user_id().unwrap_err().status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_ensure_owner() {
        let owner = Uuid::new_v4();
        let user = auth_user(owner, Role::Educator);

        assert!(user.ensure_owner(owner).is_ok());
        assert_eq!(
            user.ensure_owner(Uuid::new_v4()).unwrap_err().status,
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("abc.def.ghi"), None);
    }
}
