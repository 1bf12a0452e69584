//! JWT claim structures and the role carried inside them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The two account roles.
///
/// Stored in the `users.role` column as the PostgreSQL enum `user_role` and
/// serialized in JSON and tokens as `"educator"` / `"learner"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Educator,
    Learner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Educator => "educator",
            Role::Learner => "learner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "educator" => Ok(Role::Educator),
            "learner" => Ok(Role::Learner),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Claims embedded in every access token.
///
/// The role is trusted as issued until `exp`; nothing is re-read from the
/// database on verification.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub role: Role,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_role_lowercase() {
        let claims = Claims {
            sub: "user-id-123".to_string(),
            role: Role::Educator,
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""role":"educator""#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"user-id-456","role":"learner","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "user-id-456");
        assert_eq!(claims.role, Role::Learner);
        assert_eq!(claims.exp, 9999999999);
    }

    #[test]
    fn test_claims_reject_unknown_role() {
        let json = r#"{"sub":"x","role":"admin","exp":1,"iat":1}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("educator".parse::<Role>().unwrap(), Role::Educator);
        assert_eq!("Learner".parse::<Role>().unwrap(), Role::Learner);
        assert!("admin".parse::<Role>().is_err());
        assert_eq!(Role::Learner.to_string(), "learner");
    }
}
