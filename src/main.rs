use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use biolink::config::{Cli, Config};
use biolink::db;
use biolink::routes;
use biolink::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;

    // Ensure uploads directory exists
    std::fs::create_dir_all(config.uploads_path())?;

    // Initialize database
    let pool = db::create_pool(&config.db_path())?;
    db::run_migrations(&pool)?;
    db::bootstrap_admin(
        &pool,
        &config.auth.admin_username,
        config.auth.admin_password.as_deref(),
    )?;

    if config.riot.api_key.is_none() {
        tracing::info!("No Riot API key configured; League widget serves sample data unless the profile sets one");
    }

    let state = AppState::new(pool, config.clone())?;
    let app = routes::router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
