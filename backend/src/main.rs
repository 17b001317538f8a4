//! Backend entry-point: loads settings, prepares the store, and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use jobs_backend::inbound::http::health::HealthState;
use jobs_backend::outbound::memory::MemorySeed;
use jobs_backend::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

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

    let settings =
        ServerSettings::load().map_err(|err| eyre!("failed to load server settings: {err}"))?;
    let config = resolve_config(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config)
        .wrap_err_with(|| format!("failed to bind {}", config.bind_addr))?;
    info!(bind_addr = %config.bind_addr, "server listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server terminated with an error")
}

async fn resolve_config(settings: &ServerSettings) -> Result<ServerConfig> {
    let bind_addr = settings.bind_addr().wrap_err("invalid bind address")?;
    let config = ServerConfig::new(bind_addr);

    let Some(pool_config) = settings.pool_config() else {
        return with_memory_seed(settings, config);
    };

    if settings.run_migrations {
        let applied = run_pending_migrations(pool_config.database_url())
            .await
            .wrap_err("failed to run database migrations")?;
        info!(applied, "database schema up to date");
    }

    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;
    Ok(config.with_db_pool(pool))
}

/// Configure the in-memory store used when no database is set. State is
/// lost on exit, and apply requests only succeed for seeded users and jobs.
fn with_memory_seed(settings: &ServerSettings, config: ServerConfig) -> Result<ServerConfig> {
    let Some(path) = settings.memory_seed.as_deref() else {
        warn!(
            "no database URL configured; serving from an empty in-memory store \
             (demo and test mode). Set JOBS_MEMORY_SEED to preload users and jobs"
        );
        return Ok(config);
    };

    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read memory seed {}", path.display()))?;
    let seed = MemorySeed::from_json(&raw)
        .wrap_err_with(|| format!("invalid memory seed {}", path.display()))?;
    warn!(
        seed = %path.display(),
        users = seed.users.len(),
        jobs = seed.jobs.len(),
        "no database URL configured; serving from a seeded in-memory store"
    );
    Ok(config.with_memory_seed(seed))
}
