use std::sync::Arc;

use sqlx::PgPool;

use learnhub_config::{CorsConfig, DatabaseConfig, JwtConfig, StorageConfig};
use learnhub_core::{FileStorage, LocalFileStorage};
use learnhub_db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub storage_config: StorageConfig,
    pub storage: Arc<dyn FileStorage>,
}

impl AppState {
    /// Builds state around an existing pool with a local media store.
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        storage_config: StorageConfig,
    ) -> Self {
        let storage = LocalFileStorage::with_max_size(
            storage_config.base_dir.clone(),
            storage_config.public_url.clone(),
            storage_config.max_upload_bytes,
        );

        Self {
            db,
            jwt_config,
            cors_config,
            storage_config,
            storage: Arc::new(storage),
        }
    }
}

pub async fn init_app_state(database_config: &DatabaseConfig) -> Result<AppState, sqlx::Error> {
    let db = init_db_pool(database_config).await?;

    Ok(AppState::new(
        db,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
        StorageConfig::from_env(),
    ))
}
