use crate::error::{ClaimboardError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/food_wastage";
const DEFAULT_MAX_CONNECTIONS: u32 = 4;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;
const CATALOG_FILE_NAME: &str = "catalog.yaml";

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env_opt(key) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ClaimboardError::Config(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(None),
    }
}

/// Connection settings for the Postgres gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    /// Build config from environment variables.
    ///
    /// `CLAIMBOARD_DATABASE_URL` takes precedence over `DATABASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::read_env()?.validated()
    }

    /// Environment config with an optional command-line URL on top.
    pub fn resolve(database_url: Option<String>) -> Result<Self> {
        let config = Self::read_env()?;
        match database_url {
            Some(url) => config.with_database_url(url),
            None => config,
        }
        .validated()
    }

    fn read_env() -> Result<Self> {
        let defaults = Self::default();

        let database_url = env_opt("CLAIMBOARD_DATABASE_URL")
            .or_else(|| env_opt("DATABASE_URL"))
            .unwrap_or(defaults.database_url);

        let max_connections = env_parsed::<u32>("CLAIMBOARD_MAX_CONNECTIONS")?
            .unwrap_or(defaults.max_connections);

        let acquire_timeout = env_parsed::<u64>("CLAIMBOARD_ACQUIRE_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.acquire_timeout);

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout,
        })
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    fn validated(self) -> Result<Self> {
        if !(self.database_url.starts_with("postgres://")
            || self.database_url.starts_with("postgresql://"))
        {
            return Err(ClaimboardError::Config(format!(
                "Unsupported database URL '{}'. Expected postgres:// or postgresql://",
                self.database_url
            )));
        }
        if self.max_connections == 0 {
            return Err(ClaimboardError::Config(
                "CLAIMBOARD_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Resolve which catalog file, if any, replaces the built-in table.
///
/// An explicit path (flag or `CLAIMBOARD_CATALOG`) must exist; the per-user
/// default is only used when present.
pub fn catalog_path(explicit: Option<PathBuf>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit.or_else(|| env_opt("CLAIMBOARD_CATALOG").map(PathBuf::from)) {
        if !path.is_file() {
            return Err(ClaimboardError::Config(format!(
                "Catalog file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    Ok(dirs::config_dir()
        .map(|dir| dir.join("claimboard").join(CATALOG_FILE_NAME))
        .filter(|path| path.is_file()))
}
