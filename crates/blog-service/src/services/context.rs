//! Service context - dependency container for services
//!
//! Holds all repositories, the optional homepage cache, and other
//! dependencies needed by services.

use std::sync::Arc;

use blog_cache::HomepageCache;
use blog_common::{BlogSettings, JwtService};
use blog_core::traits::{BlogRepository, CourseRepository, UserRepository, VideoRepository};
use blog_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};
use super::scheduler::PublishScheduler;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories for blogs, users and the homepage catalog
/// - The homepage snapshot cache, when Redis is configured
/// - JWT service for authentication
/// - Snowflake generator for ID generation
/// - The publish scheduler for deferred blogs
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    blog_repo: Arc<dyn BlogRepository>,
    user_repo: Arc<dyn UserRepository>,
    course_repo: Arc<dyn CourseRepository>,
    video_repo: Arc<dyn VideoRepository>,

    // Cache
    homepage_cache: Option<HomepageCache>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    scheduler: Arc<PublishScheduler>,

    settings: BlogSettings,
}

impl ServiceContext {
    // === Repositories ===

    /// Get the blog repository
    pub fn blog_repo(&self) -> &dyn BlogRepository {
        self.blog_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn course_repo(&self) -> &dyn CourseRepository {
        self.course_repo.as_ref()
    }

    pub fn video_repo(&self) -> &dyn VideoRepository {
        self.video_repo.as_ref()
    }

    // === Cache ===

    /// Homepage snapshot cache; `None` when running without Redis
    pub fn homepage_cache(&self) -> Option<&HomepageCache> {
        self.homepage_cache.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    pub fn scheduler(&self) -> &PublishScheduler {
        self.scheduler.as_ref()
    }

    pub fn settings(&self) -> &BlogSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("homepage_cache", &self.homepage_cache.is_some())
            .field("scheduler", &self.scheduler)
            .field("settings", &self.settings)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    blog_repo: Option<Arc<dyn BlogRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    course_repo: Option<Arc<dyn CourseRepository>>,
    video_repo: Option<Arc<dyn VideoRepository>>,
    homepage_cache: Option<HomepageCache>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    settings: BlogSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blog_repo(mut self, repo: Arc<dyn BlogRepository>) -> Self {
        self.blog_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn course_repo(mut self, repo: Arc<dyn CourseRepository>) -> Self {
        self.course_repo = Some(repo);
        self
    }

    pub fn video_repo(mut self, repo: Arc<dyn VideoRepository>) -> Self {
        self.video_repo = Some(repo);
        self
    }

    /// Optional; without it the homepage is computed on every request
    pub fn homepage_cache(mut self, cache: HomepageCache) -> Self {
        self.homepage_cache = Some(cache);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn settings(mut self, settings: BlogSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext. The publish scheduler is created here on top
    /// of the blog repository.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let blog_repo = self
            .blog_repo
            .ok_or_else(|| ServiceError::validation("blog_repo is required"))?;

        Ok(ServiceContext {
            scheduler: Arc::new(
                PublishScheduler::new(Arc::clone(&blog_repo))
                    .with_homepage_cache(self.homepage_cache.clone()),
            ),
            blog_repo,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            course_repo: self
                .course_repo
                .ok_or_else(|| ServiceError::validation("course_repo is required"))?,
            video_repo: self
                .video_repo
                .ok_or_else(|| ServiceError::validation("video_repo is required"))?,
            homepage_cache: self.homepage_cache,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            settings: self.settings,
        })
    }
}
