//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use blog_cache::{HomepageCache, RedisPool};
use blog_common::{AppConfig, AppError, JwtService};
use blog_core::SnowflakeGenerator;
use blog_db::{
    create_pool, run_migrations, PgBlogRepository, PgCourseRepository, PgUserRepository,
    PgVideoRepository,
};
use blog_service::{BlogService, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_common_layers, apply_middleware};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_common_layers(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("Database migrations applied");
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let mut builder = ServiceContextBuilder::new()
        .blog_repo(Arc::new(PgBlogRepository::new(pool.clone())))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .course_repo(Arc::new(PgCourseRepository::new(pool.clone())))
        .video_repo(Arc::new(PgVideoRepository::new(pool.clone())))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .settings(config.blog.clone());

    match &config.redis {
        Some(redis) => {
            info!("Connecting to Redis...");
            let redis_pool =
                RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            builder = builder.homepage_cache(HomepageCache::new(
                redis_pool,
                config.blog.homepage_cache_ttl,
            ));
            info!("Redis pool ready");
        }
        None => warn!("REDIS_URL not set; homepage served uncached"),
    }

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config).with_pool(pool))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;

    let restored = BlogService::new(state.service_context())
        .restore_schedules()
        .await
        .map_err(AppError::from)?;
    info!(count = restored, "Publish schedules restored");

    let app = create_app(state);

    run_server(app, addr).await
}
