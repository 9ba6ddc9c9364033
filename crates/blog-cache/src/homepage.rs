//! Cached homepage snapshot
//!
//! One key holds the whole joined homepage payload. Writers that change what
//! the homepage shows call [`HomepageCache::invalidate`].

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::pool::{RedisPool, RedisResult};

pub const HOMEPAGE_KEY: &str = "homepage:snapshot";

#[derive(Debug, Clone)]
pub struct HomepageCache {
    pool: RedisPool,
    ttl: Duration,
}

impl HomepageCache {
    pub fn new(pool: RedisPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn pool(&self) -> &RedisPool {
        &self.pool
    }

    pub async fn load<T: DeserializeOwned>(&self) -> RedisResult<Option<T>> {
        let snapshot = self.pool.get_json(HOMEPAGE_KEY).await?;
        debug!(hit = snapshot.is_some(), "Homepage cache lookup");
        Ok(snapshot)
    }

    pub async fn store<T: Serialize>(&self, snapshot: &T) -> RedisResult<()> {
        self.pool.set_json(HOMEPAGE_KEY, snapshot, self.ttl).await
    }

    pub async fn invalidate(&self) -> RedisResult<()> {
        self.pool.delete(HOMEPAGE_KEY).await.map(|_| ())
    }
}
