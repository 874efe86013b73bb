use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use movies_api::config::AppConfig;
use movies_api::database::init_db;
use movies_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, db)
        .await
        .context("Failed to prepare upload directory")?;
    let app = movies_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
