//! Grammable entry-point: loads settings, wires adapters and serves HTTP.

mod server;

use std::time::Duration;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use grammable::inbound::http::health::HealthState;
use grammable::inbound::http::session_config::{BuildMode, session_settings_from_env};
use grammable::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use grammable::settings::AppSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

const DB_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().context("failed to load GRAMMABLE settings")?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .context("invalid session configuration")?;
    info!(
        key_fingerprint = %session.key_fingerprint(),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let mut config = ServerConfig::new(session, settings.bind_addr())
        .with_max_picture_bytes(settings.max_upload_bytes());

    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .context("failed to apply database migrations")?;
        let pool = DbPool::new(
            PoolConfig::new(database_url)
                .with_max_size(settings.db_max_connections())
                .with_connection_timeout(DB_CONNECTION_TIMEOUT),
        )
        .await
        .context("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }
    if let Some(dir) = settings.upload_dir() {
        config = config.with_upload_dir(dir.to_path_buf());
    }

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = settings.bind_addr();
    let server = create_server(health_state.clone(), config)
        .with_context(|| format!("failed to start server on {bind_addr}"))?;
    info!(%bind_addr, "grammable listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result.context("server terminated with an error")
}
