use std::{env, fmt};

use serde::Deserialize;
use tracing::info;

#[derive(Clone, Copy, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Clone, Copy, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Memory,
    Redis,
}

#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_env")]
    pub env: String, // file / server
    pub host: String,
    pub port: u16,
    pub prefix: Option<String>,
    #[serde(default = "default_store_backend")]
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    #[serde(default = "default_cache_backend")]
    pub cache_backend: CacheBackend,
    pub redis_url: Option<String>,
    /// seconds
    #[serde(default = "default_grant_cache_ttl")]
    pub grant_cache_ttl: u64,
    pub jwt_secret: String,
    pub jwt_exp: u16,
    pub jwt_refresh_exp: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_to_console: bool,
}

fn default_env() -> String {
    "file".to_string()
}

fn default_store_backend() -> StoreBackend {
    StoreBackend::Postgres
}

fn default_cache_backend() -> CacheBackend {
    CacheBackend::Redis
}

fn default_grant_cache_ttl() -> u64 {
    300
}

fn default_log_level() -> String {
    "debug".to_string()
}

const REDACTED: &str = "***";

/// Hides the `user:password@` part of a connection url.
pub fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}{}{}", &url[..scheme_end + 3], REDACTED, &url[at..])
        }
        _ => url.to_string(),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("env", &self.env)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("prefix", &self.prefix)
            .field("store_backend", &self.store_backend)
            .field("database_url", &self.database_url.as_deref().map(redact_url))
            .field("cache_backend", &self.cache_backend)
            .field("redis_url", &self.redis_url.as_deref().map(redact_url))
            .field("grant_cache_ttl", &self.grant_cache_ttl)
            .field("jwt_secret", &REDACTED)
            .field("jwt_exp", &self.jwt_exp)
            .field("jwt_refresh_exp", &self.jwt_refresh_exp)
            .field("log_level", &self.log_level)
            .field("log_to_console", &self.log_to_console)
            .finish()
    }
}

impl Config {
    /// Checks that every selected backend has its connection url.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.store_backend == StoreBackend::Postgres && self.database_url.is_none() {
            anyhow::bail!("DATABASE_URL is required when STORE_BACKEND=postgres");
        }
        if self.cache_backend == CacheBackend::Redis && self.redis_url.is_none() {
            anyhow::bail!("REDIS_URL is required when CACHE_BACKEND=redis");
        }
        if self.jwt_secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }
        Ok(())
    }

    pub fn database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))
    }

    pub fn redis_url(&self) -> anyhow::Result<&str> {
        self.redis_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("REDIS_URL is not set"))
    }
}

pub fn get_config() -> anyhow::Result<Config> {
    let env_var = env::var("ENV").unwrap_or("file".to_string());
    if env_var == "file" {
        info!("using .env file as environtment variable");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environtment as environtment variable");
    }
    let config = envy::from_env::<Config>()?;
    config.validate()?;
    Ok(config)
}
