use dotenvy::dotenv;
use tracing::info;

use learnhub::logging::init_tracing;
use learnhub::metrics::{init_metrics, metrics_app};
use learnhub::router::init_router;
use learnhub::state::init_app_state;
use learnhub_config::{DatabaseConfig, ServerConfig};
use learnhub_db::run_migrations;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let database_config = DatabaseConfig::from_env();
    let server_config = ServerConfig::from_env();

    let state = init_app_state(&database_config).await?;

    if database_config.run_migrations {
        run_migrations(&state.db).await?;
    }

    tokio::fs::create_dir_all(&state.storage_config.base_dir).await?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics()? {
        app = app.merge(metrics_app(handle));
    }

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!("Server running on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app).await?;

    Ok(())
}
