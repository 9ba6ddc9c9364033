//! Application configuration
//!
//! Loaded from environment variables, with `.env` applied first when present.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    /// Absent when `REDIS_URL` is not set; the homepage is then served uncached
    pub redis: Option<RedisConfig>,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
    pub blog: BlogSettings,
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment {other:?}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Seconds
    pub access_token_expiry: i64,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

impl RateLimitConfig {
    /// Interval after which one request of the quota is replenished
    #[must_use]
    pub fn replenish_period(&self) -> Duration {
        Duration::from_secs(1) / self.requests_per_second.max(1)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

/// Blog behaviour switches
#[derive(Debug, Clone)]
pub struct BlogSettings {
    /// Mark new blogs as verified on creation instead of waiting for review
    pub auto_verify: bool,
    pub homepage_cache_ttl: Duration,
    /// Cap on the popular side-list next to a blog read by slug; `None` lists all
    pub popular_sidebar_limit: Option<u32>,
    /// Cap on the popular blogs shown on the homepage; `None` lists all
    pub homepage_blog_limit: Option<u32>,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            auto_verify: false,
            homepage_cache_ttl: Duration::from_secs(DEFAULT_HOMEPAGE_CACHE_TTL_SECS),
            popular_sidebar_limit: None,
            homepage_blog_limit: None,
        }
    }
}

const DEFAULT_APP_NAME: &str = "devblog";
/// Ids reserve 10 bits for the worker
const MAX_WORKER_ID: u16 = 1024;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_MIN_CONNECTIONS: u32 = 5;
const DEFAULT_REDIS_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 900;
const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;
const DEFAULT_BURST: u32 = 50;
const DEFAULT_HOMEPAGE_CACHE_TTL_SECS: u64 = 60;

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // .env is optional
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let redis = vars.get("REDIS_URL").map(|url| -> Result<_, ConfigError> {
            Ok(RedisConfig {
                url,
                max_connections: vars
                    .parse("REDIS_MAX_CONNECTIONS")?
                    .unwrap_or(DEFAULT_REDIS_MAX_CONNECTIONS),
            })
        });

        let requests_per_second: u32 = vars
            .parse("RATE_LIMIT_REQUESTS_PER_SECOND")?
            .unwrap_or(DEFAULT_REQUESTS_PER_SECOND);
        if requests_per_second == 0 {
            return Err(ConfigError::InvalidValue(
                "RATE_LIMIT_REQUESTS_PER_SECOND",
                requests_per_second.to_string(),
            ));
        }

        let burst: u32 = vars.parse("RATE_LIMIT_BURST")?.unwrap_or(DEFAULT_BURST);
        if burst == 0 {
            return Err(ConfigError::InvalidValue("RATE_LIMIT_BURST", burst.to_string()));
        }

        let worker_id: u16 = vars.parse("WORKER_ID")?.unwrap_or(0);
        if worker_id >= MAX_WORKER_ID {
            return Err(ConfigError::InvalidValue("WORKER_ID", worker_id.to_string()));
        }

        Ok(Self {
            app: AppSettings {
                name: vars
                    .get("APP_NAME")
                    .unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
                env: vars.parse("APP_ENV")?.unwrap_or_default(),
            },
            api: ServerConfig {
                host: vars
                    .get("API_HOST")
                    .unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: vars.parse("API_PORT")?.unwrap_or(DEFAULT_PORT),
            },
            database: DatabaseConfig {
                url: vars.require("DATABASE_URL")?,
                max_connections: vars
                    .parse("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or(DEFAULT_MAX_CONNECTIONS),
                min_connections: vars
                    .parse("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or(DEFAULT_MIN_CONNECTIONS),
                run_migrations: vars.flag("DATABASE_RUN_MIGRATIONS")?.unwrap_or(true),
            },
            redis: redis.transpose()?,
            jwt: JwtConfig {
                secret: vars.require("JWT_SECRET")?,
                access_token_expiry: vars
                    .parse("JWT_ACCESS_TOKEN_EXPIRY")?
                    .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY),
            },
            rate_limit: RateLimitConfig {
                requests_per_second,
                burst,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id,
            },
            blog: BlogSettings {
                auto_verify: vars.flag("BLOG_AUTO_VERIFY")?.unwrap_or(false),
                homepage_cache_ttl: Duration::from_secs(
                    vars.parse("HOMEPAGE_CACHE_TTL_SECS")?
                        .unwrap_or(DEFAULT_HOMEPAGE_CACHE_TTL_SECS),
                ),
                popular_sidebar_limit: vars.parse("POPULAR_SIDEBAR_LIMIT")?,
                homepage_blog_limit: vars.parse("HOMEPAGE_BLOG_LIMIT")?,
            },
        })
    }
}

struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn require(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parse<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(key, raw))
            })
            .transpose()
    }

    fn flag(&self, key: &'static str) -> Result<Option<bool>, ConfigError> {
        self.get(key)
            .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue(key, raw)),
            })
            .transpose()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
