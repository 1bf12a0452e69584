use sqlx::PgPool;
use tracing::{info, instrument, warn};

use learnhub_auth::issue_token;
use learnhub_config::JwtConfig;
use learnhub_core::{AppError, decode_transport_password, hash_password, verify_password};
use learnhub_models::{User, UserCredentials};

use crate::metrics;
use crate::modules::auth::model::{LoginRequest, RegisterRequest, TokenResponse};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

fn duplicate_identity() -> AppError {
    AppError::bad_request(anyhow::anyhow!("Username or email already exists"))
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .fetch_one(db)
        .await?;

        if exists {
            return Err(duplicate_identity());
        }

        let password = decode_transport_password(&dto.password)?;
        let (hashed_password, salt) = hash_password(&password)?;

        // A concurrent registration can still win the race to the unique index.
        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (username, email, password, salt, role)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, username, email, role, created_at, updated_at"#,
        )
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&salt)
        .bind(dto.role)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return duplicate_identity();
            }
            AppError::from(e)
        })?;

        let token = issue_token(user.id, user.role, jwt_config)?;

        metrics::track_user_registered(user.role);
        metrics::track_jwt_issued();
        info!(user_id = %user.id, "User registered");

        Ok(TokenResponse { token })
    }

    #[instrument(skip(db, dto, jwt_config), fields(username = %dto.username))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        // Decoded before the lookup so a malformed password fails the same
        // way for known and unknown usernames.
        let password = decode_transport_password(&dto.password)?;

        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, role, password, salt FROM users WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?;

        let Some(credentials) = credentials else {
            metrics::track_user_login_failure("unknown_user");
            warn!("Login failed: unknown username");
            return Err(AppError::bad_request(anyhow::anyhow!(INVALID_CREDENTIALS)));
        };

        if !verify_password(&password, &credentials.password)? {
            metrics::track_user_login_failure("wrong_password");
            warn!(user_id = %credentials.id, "Login failed: wrong password");
            return Err(AppError::bad_request(anyhow::anyhow!(INVALID_CREDENTIALS)));
        }

        let token = issue_token(credentials.id, credentials.role, jwt_config)?;

        metrics::track_user_login_success(credentials.role);
        metrics::track_jwt_issued();

        Ok(TokenResponse { token })
    }
}
