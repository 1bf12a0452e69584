//! Role checks (guard step 3).

use axum::{extract::FromRequestParts, http::request::Parts};

use learnhub_auth::Role;
use learnhub_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub fn check_role(auth_user: &AuthUser, required: Role) -> Result<(), AppError> {
    if !auth_user.has_role(required) {
        return Err(AppError::forbidden(format!(
            "Access denied. This action requires the {} role.",
            required
        )));
    }
    Ok(())
}

/// Defines an extractor that authenticates the caller and requires one role.
macro_rules! require_role {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = AuthUser::from_request_parts(parts, state).await?;
                check_role(&auth_user, $role)?;
                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireEducator, Role::Educator);
require_role!(RequireLearner, Role::Learner);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use learnhub_auth::Claims;

    fn auth_user(role: Role) -> AuthUser {
        AuthUser(Claims {
            sub: "00000000-0000-0000-0000-000000000000".to_string(),
            role,
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_check_role_exact_match() {
        assert!(check_role(&auth_user(Role::Educator), Role::Educator).is_ok());
        assert!(check_role(&auth_user(Role::Learner), Role::Learner).is_ok());
    }

    #[test]
    fn test_check_role_mismatch_is_forbidden() {
        let err = check_role(&auth_user(Role::Learner), Role::Educator).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let err = check_role(&auth_user(Role::Educator), Role::Learner).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
