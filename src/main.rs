use anyhow::Context;
use flowdeck::configuration::get_configuration;
use flowdeck::database::{get_connection_pool, migrate_database};
use flowdeck::server::config::configure_app;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let configuration = get_configuration().context("Failed to load configuration")?;

    let pool = get_connection_pool(&configuration)
        .await
        .context("Failed to connect to Postgres")?;
    migrate_database(&pool)
        .await
        .context("Failed to run database migrations")?;

    let app = configure_app(pool);

    let addr: SocketAddr = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    )
    .parse()
    .context("Invalid listen address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listener")?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
