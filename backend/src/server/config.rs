//! Server settings loaded via OrthoConfig and the resolved server
//! configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use jobs_backend::outbound::memory::MemorySeed;
use jobs_backend::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_MIN_IDLE: u32 = 2;

/// Settings read from CLI flags, `JOBS_*` environment variables, and the
/// configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOBS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps state in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub db_max_connections: Option<u32>,
    /// Connections kept open while idle.
    pub db_min_idle: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// JSON file of users and jobs preloaded into the in-memory store.
    /// Ignored when a database URL is set.
    pub memory_seed: Option<PathBuf>,
}

impl ServerSettings {
    /// Parsed listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns the parse error when the configured address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?.trim();
        if url.is_empty() {
            return None;
        }
        Some(
            PoolConfig::new(url)
                .with_max_size(self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS))
                .with_min_idle(Some(self.db_min_idle.unwrap_or(DEFAULT_DB_MIN_IDLE))),
        )
    }
}

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) memory_seed: Option<MemorySeed>,
}

impl ServerConfig {
    /// Configuration backed by the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            memory_seed: None,
        }
    }

    /// Preload the in-memory store. Has no effect once a pool is attached.
    #[must_use]
    pub fn with_memory_seed(mut self, seed: MemorySeed) -> Self {
        self.memory_seed = Some(seed);
        self
    }

    /// Attach a database pool so the PostgreSQL adapters back every port.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "JOBS_BIND_ADDR",
        "JOBS_DATABASE_URL",
        "JOBS_DB_MAX_CONNECTIONS",
        "JOBS_DB_MIN_IDLE",
        "JOBS_RUN_MIGRATIONS",
        "JOBS_MEMORY_SEED",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("jobs-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_select_in_memory_store() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("valid address")
        );
        assert!(settings.run_migrations);
        assert!(settings.pool_config().is_none());
        assert!(settings.memory_seed.is_none());
    }

    #[rstest]
    fn memory_seed_path_is_read_from_environment() {
        let _guard = lock_env([
            ("JOBS_BIND_ADDR", None::<String>),
            ("JOBS_DATABASE_URL", None),
            ("JOBS_DB_MAX_CONNECTIONS", None),
            ("JOBS_DB_MIN_IDLE", None),
            ("JOBS_RUN_MIGRATIONS", None),
            ("JOBS_MEMORY_SEED", Some("/etc/jobs/seed.json".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.memory_seed,
            Some(PathBuf::from("/etc/jobs/seed.json"))
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("JOBS_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "JOBS_DATABASE_URL",
                Some("postgres://jobs@localhost/jobs".to_owned()),
            ),
            ("JOBS_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("JOBS_DB_MIN_IDLE", Some("1".to_owned())),
            ("JOBS_RUN_MIGRATIONS", Some("false".to_owned())),
            ("JOBS_MEMORY_SEED", None),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("address parses"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("valid address")
        );
        assert!(!settings.run_migrations);
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://jobs@localhost/jobs");
        assert_eq!(pool.max_size(), 4);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env([
            ("JOBS_BIND_ADDR", None::<String>),
            ("JOBS_DATABASE_URL", Some("  ".to_owned())),
            ("JOBS_DB_MAX_CONNECTIONS", None),
            ("JOBS_DB_MIN_IDLE", None),
            ("JOBS_RUN_MIGRATIONS", None),
            ("JOBS_MEMORY_SEED", None),
        ]);

        assert!(load_from_empty_args().pool_config().is_none());
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env([
            ("JOBS_BIND_ADDR", Some("localhost".to_owned())),
            ("JOBS_DATABASE_URL", None::<String>),
            ("JOBS_DB_MAX_CONNECTIONS", None),
            ("JOBS_DB_MIN_IDLE", None),
            ("JOBS_RUN_MIGRATIONS", None),
            ("JOBS_MEMORY_SEED", None),
        ]);

        assert!(load_from_empty_args().bind_addr().is_err());
    }
}
