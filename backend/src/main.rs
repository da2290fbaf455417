//! Backend entry-point: loads settings, prepares the store and serves HTTP.

mod server;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use todo_backend::outbound::persistence::{
    DbPool, MigrationError, PoolConfig, PoolError, run_migrations,
};
use todo_backend::settings::{AppSettings, SettingsError};

/// Failures that stop the process before or while serving.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to load settings: {0}")]
    Settings(String),
    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),
    #[error("failed to create database pool: {0}")]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install JSON logging filtered by `RUST_LOG`, defaulting to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

/// Build the pool and apply migrations, or return `None` when no database is
/// configured.
async fn prepare_store(settings: &AppSettings) -> Result<Option<DbPool>, StartupError> {
    let Some(database_url) = settings.database_url()? else {
        warn!("database settings incomplete; serving from the in-memory store");
        return Ok(None);
    };

    if settings.run_migrations() {
        run_migrations(database_url.clone()).await?;
    }
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections),
    )
    .await?;
    info!(max_connections = settings.db_max_connections, "database pool ready");
    Ok(Some(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    init_tracing();

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| StartupError::Settings(e.to_string()))?;
    let bind_addr = settings.bind_addr()?;
    let db_pool = prepare_store(&settings).await?;

    let config = match db_pool.clone() {
        Some(pool) => ServerConfig::new(bind_addr).with_db_pool(pool),
        None => ServerConfig::new(bind_addr),
    };
    let server = create_server(&config)?;
    info!(%bind_addr, "listening");

    let outcome = server.await;
    info!("server stopped");
    if let Some(pool) = db_pool {
        pool.close();
    }
    outcome.map_err(StartupError::from)
}
