//! Cache of role grants read by the permission matrix.
//!
//! Every role carries a generation that [`GrantCache::invalidate`] bumps. A
//! reader takes the generation before it reads the store and hands it back to
//! [`GrantCache::put`]; the put is dropped when a grant/revoke invalidated the
//! role in between, so a slow reader can never cache grants older than a
//! completed write.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use r2d2::Pool;
use redis::Client;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{core::error::HrResult, model::role::Role};

#[async_trait]
pub trait GrantCache: Send + Sync {
    async fn get(&self, role: Role) -> HrResult<Option<HashSet<Uuid>>>;
    /// Current generation of `role`; read it before loading grants to cache.
    async fn generation(&self, role: Role) -> HrResult<u64>;
    /// Stores `grants` if `role` is still at `generation`. Returns whether it did.
    async fn put(&self, role: Role, grants: &HashSet<Uuid>, generation: u64) -> HrResult<bool>;
    async fn invalidate(&self, role: Role) -> HrResult<()>;
}

#[derive(Default)]
struct Entry {
    generation: u64,
    grants: Option<HashSet<Uuid>>,
}

#[derive(Default)]
pub struct MemoryGrantCache {
    entries: RwLock<HashMap<Role, Entry>>,
}

impl MemoryGrantCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GrantCache for MemoryGrantCache {
    async fn get(&self, role: Role) -> HrResult<Option<HashSet<Uuid>>> {
        Ok(self
            .entries
            .read()
            .await
            .get(&role)
            .and_then(|x| x.grants.clone()))
    }

    async fn generation(&self, role: Role) -> HrResult<u64> {
        Ok(self
            .entries
            .read()
            .await
            .get(&role)
            .map(|x| x.generation)
            .unwrap_or(0))
    }

    async fn put(&self, role: Role, grants: &HashSet<Uuid>, generation: u64) -> HrResult<bool> {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(role).or_default();
        if entry.generation != generation {
            return Ok(false);
        }
        entry.grants = Some(grants.clone());
        Ok(true)
    }

    async fn invalidate(&self, role: Role) -> HrResult<()> {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(role).or_default();
        entry.generation += 1;
        entry.grants = None;
        Ok(())
    }
}

/// Grants stored as a JSON list under `role_grants:{role}` with a TTL. The
/// generation lives under `role_grants_generation:{role}`; puts are applied in
/// a `WATCH`/`MULTI` transaction on it.
pub struct RedisGrantCache {
    pool: Pool<Client>,
    ttl_seconds: u64,
}

impl RedisGrantCache {
    pub fn new(pool: Pool<Client>, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(role: Role) -> String {
        format!("role_grants:{}", role)
    }

    fn generation_key(role: Role) -> String {
        format!("role_grants_generation:{}", role)
    }
}

#[async_trait]
impl GrantCache for RedisGrantCache {
    async fn get(&self, role: Role) -> HrResult<Option<HashSet<Uuid>>> {
        let mut conn = self.pool.get()?;
        let res: Option<String> = redis::cmd("get")
            .arg(Self::key(role))
            .query(&mut *conn)?;
        let Some(res) = res else {
            return Ok(None);
        };
        let grants: HashSet<Uuid> = serde_json::from_str(&res).map_err(anyhow::Error::from)?;
        Ok(Some(grants))
    }

    async fn generation(&self, role: Role) -> HrResult<u64> {
        let mut conn = self.pool.get()?;
        let res: Option<u64> = redis::cmd("get")
            .arg(Self::generation_key(role))
            .query(&mut *conn)?;
        Ok(res.unwrap_or(0))
    }

    async fn put(&self, role: Role, grants: &HashSet<Uuid>, generation: u64) -> HrResult<bool> {
        let mut conn = self.pool.get()?;
        let grants_json = serde_json::to_string(grants).map_err(anyhow::Error::from)?;
        let key = Self::key(role);
        let generation_key = Self::generation_key(role);
        let stored: bool = redis::transaction(&mut *conn, &[&generation_key], |con, pipe| {
            let current: Option<u64> = redis::cmd("get").arg(&generation_key).query(con)?;
            if current.unwrap_or(0) != generation {
                return Ok(Some(false));
            }
            // a nil reply means the generation moved after WATCH; the retry sees it
            let res: Option<(Option<u64>,)> = pipe
                .cmd("set")
                .arg(&key)
                .arg(&grants_json)
                .arg("EX")
                .arg(self.ttl_seconds)
                .ignore()
                .cmd("get")
                .arg(&generation_key)
                .query(con)?;
            Ok(res.map(|_| true))
        })?;
        Ok(stored)
    }

    async fn invalidate(&self, role: Role) -> HrResult<()> {
        let mut conn = self.pool.get()?;
        redis::pipe()
            .atomic()
            .cmd("incr")
            .arg(Self::generation_key(role))
            .ignore()
            .cmd("del")
            .arg(Self::key(role))
            .ignore()
            .query::<()>(&mut *conn)?;
        Ok(())
    }
}


#[cfg(all(test, feature = "redis-tests"))]
mod redis_tests {
    use super::*;

    fn redis_cache() -> RedisGrantCache {
        let redis_url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let client = redis::Client::open(redis_url).unwrap();
        let pool = r2d2::Pool::builder().max_size(2).build(client).unwrap();
        RedisGrantCache::new(pool, 60)
    }

    #[tokio::test]
    async fn test_redis_grant_cache() {
        let cache = redis_cache();
        cache.invalidate(Role::Hr).await.unwrap();
        assert!(cache.get(Role::Hr).await.unwrap().is_none());

        let grants: HashSet<Uuid> = [Uuid::now_v7(), Uuid::now_v7()].into_iter().collect();
        let generation = cache.generation(Role::Hr).await.unwrap();
        assert!(cache.put(Role::Hr, &grants, generation).await.unwrap());
        assert_eq!(cache.get(Role::Hr).await.unwrap(), Some(grants));

        cache.invalidate(Role::Hr).await.unwrap();
        assert!(cache.get(Role::Hr).await.unwrap().is_none());
        assert_eq!(cache.generation(Role::Hr).await.unwrap(), generation + 1);
    }

    #[tokio::test]
    async fn test_redis_put_after_invalidate_is_dropped() {
        let cache = redis_cache();
        let stale: HashSet<Uuid> = [Uuid::now_v7()].into_iter().collect();

        let generation = cache.generation(Role::Manager).await.unwrap();
        cache.invalidate(Role::Manager).await.unwrap();
        assert!(!cache.put(Role::Manager, &stale, generation).await.unwrap());
        assert!(cache.get(Role::Manager).await.unwrap().is_none());
    }
}
