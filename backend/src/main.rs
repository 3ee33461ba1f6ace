//! Backend entry-point: reads settings, prepares storage and serves HTTP.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use site_backend::inbound::http::health::HealthState;
use site_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::from_process_env().map_err(std::io::Error::other)?;
    let mut config = ServerConfig::new(settings.bind_addr());

    if let Some(database_url) = settings.database_url.clone() {
        let pool = prepare_database(database_url, settings.pool_max_size).await?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::build_prometheus());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    info!("server stopped");
    outcome
}

/// Apply pending migrations, then open the async pool.
async fn prepare_database(database_url: String, max_size: u32) -> std::io::Result<DbPool> {
    let migrations_url = database_url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&migrations_url))
        .await
        .map_err(std::io::Error::other)?
        .map_err(std::io::Error::other)?;

    DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
        .await
        .map_err(std::io::Error::other)
}
