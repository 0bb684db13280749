//! Configuration management

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{CONFIG_ENV_PREFIX, DEFAULT_LOG_LEVEL};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub storage: StorageSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

/// Which repository adapter backs the catalog
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// JSON snapshot used by the memory backend; `None` keeps the catalog volatile.
    pub snapshot_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::load_from(Path::new("config"), &env)
    }

    /// Defaults, then `<dir>/default`, then `<dir>/<env>`, then `CATALOG__*` variables.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self, ConfigError> {
        let default_file = dir.join("default");
        let env_file = dir.join(env);

        let config = Config::builder()
            .set_default("app.env", env)?
            .set_default("app.name", "menu-catalog")?
            .set_default("storage.backend", "memory")?
            .set_default("database.url", "postgres://localhost:5432/catalog")?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 3)?
            .set_default("log.level", DEFAULT_LOG_LEVEL)?
            .add_source(File::with_name(&default_file.to_string_lossy()).required(false))
            .add_source(File::with_name(&env_file.to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }
}
