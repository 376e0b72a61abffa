use std::{sync::Arc, time::Duration};

use sqlx::{pool::PoolOptions, Pool, Postgres};
use tracing::info;

use crate::{
    core::cache::{GrantCache, MemoryGrantCache, RedisGrantCache},
    settings::{redact_url, CacheBackend, Config, StoreBackend},
    store::{memory::MemoryStore, postgres::PostgresStore, HrStore},
};

pub async fn init_pool(database_url: &str) -> anyhow::Result<Pool<Postgres>> {
    let pool = PoolOptions::new()
        .min_connections(5)
        .max_connections(100)
        .idle_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn init_store(config: &Config) -> anyhow::Result<Arc<dyn HrStore>> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Init in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Postgres => {
            let database_url = config.database_url()?;
            info!("Init Postgres connection on {}", redact_url(database_url));
            let pool = init_pool(database_url).await?;
            Ok(Arc::new(PostgresStore::new(pool)))
        }
    }
}

pub fn init_grant_cache(config: &Config) -> anyhow::Result<Arc<dyn GrantCache>> {
    match config.cache_backend {
        CacheBackend::Memory => {
            info!("Init in-memory grant cache");
            Ok(Arc::new(MemoryGrantCache::new()))
        }
        CacheBackend::Redis => {
            let redis_url = config.redis_url()?;
            info!("Init Redis connection on {}", redact_url(redis_url));
            let client = redis::Client::open(redis_url)?;
            let redis_pool = r2d2::Pool::builder().build(client)?;
            Ok(Arc::new(RedisGrantCache::new(
                redis_pool,
                config.grant_cache_ttl,
            )))
        }
    }
}
