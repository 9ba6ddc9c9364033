//! Shared fixtures for service tests

use std::sync::Arc;
use std::time::Duration;

use blog_cache::{HomepageCache, RedisPool, RedisPoolConfig};
use blog_common::{BlogSettings, JwtService};
use blog_core::entities::User;
use blog_core::traits::UserRepository;
use blog_core::{Snowflake, SnowflakeGenerator};
use blog_db::{
    MemoryBlogRepository, MemoryCourseRepository, MemoryUserRepository, MemoryVideoRepository,
};

use crate::dto::CreateBlogRequest;

use super::context::{ServiceContext, ServiceContextBuilder};

pub(crate) struct Fixture {
    pub ctx: ServiceContext,
    pub blogs: Arc<MemoryBlogRepository>,
    pub users: Arc<MemoryUserRepository>,
    pub courses: Arc<MemoryCourseRepository>,
    pub videos: Arc<MemoryVideoRepository>,
}

impl Fixture {
    pub fn new(auto_verify: bool) -> Self {
        Self::with_settings(BlogSettings {
            auto_verify,
            ..BlogSettings::default()
        })
    }

    pub fn with_settings(settings: BlogSettings) -> Self {
        Self::build(settings, None)
    }

    /// Cache configured against a port nothing listens on, so every cache
    /// call fails
    pub fn with_unreachable_cache(auto_verify: bool) -> Self {
        let pool = RedisPool::new(&RedisPoolConfig {
            url: "redis://127.0.0.1:1".to_string(),
            max_connections: 1,
        })
        .unwrap();
        Self::with_cache(auto_verify, HomepageCache::new(pool, Duration::from_secs(60)))
    }

    pub fn with_cache(auto_verify: bool, cache: HomepageCache) -> Self {
        Self::build(
            BlogSettings {
                auto_verify,
                ..BlogSettings::default()
            },
            Some(cache),
        )
    }

    fn build(settings: BlogSettings, cache: Option<HomepageCache>) -> Self {
        let blogs = Arc::new(MemoryBlogRepository::new());
        let users = Arc::new(MemoryUserRepository::new());
        let courses = Arc::new(MemoryCourseRepository::new());
        let videos = Arc::new(MemoryVideoRepository::new());

        let mut builder = ServiceContextBuilder::new()
            .blog_repo(blogs.clone())
            .user_repo(users.clone())
            .course_repo(courses.clone())
            .video_repo(videos.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret", 900)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .settings(settings);
        if let Some(cache) = cache {
            builder = builder.homepage_cache(cache);
        }
        let ctx = builder.build().unwrap();

        Self {
            ctx,
            blogs,
            users,
            courses,
            videos,
        }
    }

    pub async fn user(&self, id: i64, name: &str) -> Snowflake {
        let id = Snowflake::new(id);
        let user = User::new(id, name.to_string(), format!("{name}@example.com"));
        self.users.create(&user).await.unwrap();
        id
    }
}

pub(crate) fn create_request(title: &str) -> CreateBlogRequest {
    CreateBlogRequest {
        title: title.to_string(),
        content: format!("{title} body"),
        slug: None,
        title_display: None,
        image: None,
        reading_time: None,
        tags: Vec::new(),
        is_posted: None,
        schedule: None,
    }
}

/// Homepage cache on the Redis named by `REDIS_URL`, or `None` when unset
pub(crate) fn live_cache() -> Option<HomepageCache> {
    let url = std::env::var("REDIS_URL").ok()?;
    let pool = RedisPool::new(&RedisPoolConfig {
        url,
        max_connections: 2,
    })
    .ok()?;
    Some(HomepageCache::new(pool, Duration::from_secs(60)))
}
