//! # LearnHub CLI
//!
//! Administrative helpers used by the `learnhub-cli` binary.
//!
//! ## Usage
//!
//! ```ignore
//! use learnhub_auth::Role;
//! use learnhub_cli::create_user;
//!
//! let user_id = create_user(&pool, "alice", "alice@example.com", "secret", Role::Educator).await?;
//! ```

use anyhow::{Context, bail};
use learnhub_auth::Role;
use learnhub_core::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

/// Inserts a user with a freshly salted bcrypt hash, as registration does.
///
/// `password` is the plain password; no transport decoding is applied.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        bail!("Username, email and password must not be empty");
    }

    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
    )
    .bind(username)
    .bind(email)
    .fetch_one(pool)
    .await
    .context("Failed to check for existing user")?;

    if exists {
        bail!("A user with this username or email already exists");
    }

    let (hashed_password, salt) = hash_password(password).map_err(|e| e.error)?;

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO users (username, email, password, salt, role)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id"#,
    )
    .bind(username)
    .bind(email)
    .bind(&hashed_password)
    .bind(&salt)
    .bind(role)
    .fetch_one(pool)
    .await
    .context("Failed to insert user")?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_core::verify_password;

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_create_user(pool: PgPool) {
        let id = create_user(&pool, "admin", "admin@example.com", "secret", Role::Educator)
            .await
            .unwrap();

        let (hash, role): (String, Role) =
            sqlx::query_as("SELECT password, role FROM users WHERE id = $1")
                .bind(id)
                .fetch_one(&pool)
                .await
                .unwrap();

        assert_eq!(role, Role::Educator);
        assert!(verify_password("secret", &hash).unwrap());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_create_user_duplicate(pool: PgPool) {
        create_user(&pool, "admin", "admin@example.com", "secret", Role::Educator)
            .await
            .unwrap();

        let err = create_user(&pool, "admin", "other@example.com", "secret", Role::Learner)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
