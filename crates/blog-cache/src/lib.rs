//! # blog-cache
//!
//! Redis caching layer.
//!
//! - **Connection Pool**: managed Redis connections via deadpool
//! - **Homepage cache**: the joined homepage snapshot, stored as JSON with a TTL
//!
//! ## Example
//!
//! ```ignore
//! use blog_cache::{HomepageCache, RedisPool};
//!
//! let pool = RedisPool::from_config(&config.redis)?;
//! let cache = HomepageCache::new(pool, Duration::from_secs(60));
//!
//! if let Some(snapshot) = cache.load::<Homepage>().await? { /* ... */ }
//! cache.store(&snapshot).await?;
//! cache.invalidate().await?;
//! ```

pub mod homepage;
pub mod pool;

pub use homepage::{HomepageCache, HOMEPAGE_KEY};
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
