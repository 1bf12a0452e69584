use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use learnhub_core::AppError;
use learnhub_core::decode_transport_password;
use learnhub_core::password::hash_password_with_salt;

use crate::modules::users::model::User;

fn user_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("User not found"))
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, role, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(user_not_found)
    }

    #[instrument(skip(db))]
    pub async fn update_username(
        db: &PgPool,
        user_id: Uuid,
        username: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET username = $1, updated_at = NOW() WHERE id = $2")
            .bind(username)
            .bind(user_id)
            .execute(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::bad_request(anyhow::anyhow!("Username already exists"));
                }
                AppError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }

        Ok(())
    }

    /// Rehashes under the salt already stored for the user.
    #[instrument(skip(db, encoded_password))]
    pub async fn update_password(
        db: &PgPool,
        user_id: Uuid,
        encoded_password: &str,
    ) -> Result<(), AppError> {
        let password = decode_transport_password(encoded_password)?;

        let salt = sqlx::query_scalar::<_, String>("SELECT salt FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(user_not_found)?;

        let hashed_password = hash_password_with_salt(&password, &salt)?;

        sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
            .bind(&hashed_password)
            .bind(user_id)
            .execute(db)
            .await?;

        Ok(())
    }
}
