//! Homepage service
//!
//! Joins four independent reads into one payload. The snapshot is cached in
//! Redis when a cache is configured; cache failures never fail the request.

use blog_core::entities::CourseTrack;
use tracing::{debug, instrument, warn};

use crate::dto::mappers::AuthorDirectory;
use crate::dto::{CourseSummaryResponse, HomepageBlogResponse, HomepageResponse, VideoResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct HomepageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HomepageService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Front-end courses, back-end courses, popular blogs and popular videos
    #[instrument(skip(self))]
    pub async fn get(&self) -> ServiceResult<HomepageResponse> {
        if let Some(cache) = self.ctx.homepage_cache() {
            match cache.load::<HomepageResponse>().await {
                Ok(Some(snapshot)) => return Ok(snapshot),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Homepage cache read failed"),
            }
        }

        let (course_fe, course_be, blogs, videos) = tokio::try_join!(
            self.ctx.course_repo().list_by_track(CourseTrack::FrontEnd),
            self.ctx.course_repo().list_by_track(CourseTrack::BackEnd),
            self.ctx
                .blog_repo()
                .list_popular_public(self.ctx.settings().homepage_blog_limit.map(i64::from)),
            self.ctx.video_repo().list_popular(),
        )?;

        let authors = AuthorDirectory::load(
            self.ctx.user_repo(),
            blogs.iter().map(|b| b.author_id).collect(),
        )
        .await?;

        let snapshot = HomepageResponse {
            course_fe: course_fe.into_iter().map(CourseSummaryResponse::from).collect(),
            course_be: course_be.into_iter().map(CourseSummaryResponse::from).collect(),
            blogs: blogs
                .into_iter()
                .map(|b| HomepageBlogResponse::new(b, &authors))
                .collect(),
            videos: videos.into_iter().map(VideoResponse::from).collect(),
        };

        if let Some(cache) = self.ctx.homepage_cache() {
            if let Err(e) = cache.store(&snapshot).await {
                warn!(error = %e, "Homepage cache write failed");
            }
        }

        Ok(snapshot)
    }

    /// Drop the cached snapshot after a change to what the homepage shows
    pub async fn invalidate(&self) {
        if let Some(cache) = self.ctx.homepage_cache() {
            match cache.invalidate().await {
                Ok(()) => debug!("Homepage cache invalidated"),
                Err(e) => warn!(error = %e, "Homepage cache invalidation failed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use blog_cache::HomepageCache;
    use blog_common::BlogSettings;
    use blog_core::entities::{Course, CourseRole, Video};
    use blog_core::traits::{CourseRepository, VideoRepository};
    use blog_core::Snowflake;

    use crate::dto::EditBlogRequest;
    use crate::services::test_support::{create_request, live_cache, Fixture};
    use crate::services::BlogService;

    async fn seed_catalog(fx: &Fixture) {
        let mut fe = Course::new(Snowflake::new(1), "react".into(), "React".into());
        fe.role = CourseRole {
            front_end: Some("Front-end".into()),
            back_end: None,
        };
        fe.student_count = 120;
        let mut both = Course::new(Snowflake::new(2), "fullstack".into(), "Full stack".into());
        both.role = CourseRole {
            front_end: Some("Front-end".into()),
            back_end: Some("Back-end".into()),
        };
        fx.courses.create(&fe).await.unwrap();
        fx.courses.create(&both).await.unwrap();

        let mut popular = Video::new(Snowflake::new(10), "intro".into(), "Intro".into());
        popular.is_popular = true;
        let quiet = Video::new(Snowflake::new(11), "outro".into(), "Outro".into());
        fx.videos.create(&popular).await.unwrap();
        fx.videos.create(&quiet).await.unwrap();
    }

    #[tokio::test]
    async fn test_homepage_joins_all_sections() {
        let fx = Fixture::new(true);
        seed_catalog(&fx).await;
        let author = fx.user(1, "ada").await;

        let blogs = BlogService::new(&fx.ctx);
        let shown = blogs.create(author, create_request("Shown")).await.unwrap();
        blogs.create(author, create_request("Ordinary")).await.unwrap();
        fx.blogs.set_flags(shown.id.parse().unwrap(), true, true);

        let page = HomepageService::new(&fx.ctx).get().await.unwrap();

        let fe: Vec<_> = page.course_fe.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(fe, vec!["react", "fullstack"]);
        assert_eq!(page.course_fe[0].student_count, 120);
        assert_eq!(page.course_be.len(), 1);

        assert_eq!(page.blogs.len(), 1);
        assert_eq!(page.blogs[0].id, shown.id);
        assert_eq!(page.blogs[0].posted_by.expanded().unwrap().full_name, "ada");

        assert_eq!(page.videos.len(), 1);
        assert_eq!(page.videos[0].slug, "intro");
    }

    #[tokio::test]
    async fn test_homepage_skips_unverified_and_scheduled() {
        let fx = Fixture::new(false);
        let author = fx.user(1, "ada").await;
        let blogs = BlogService::new(&fx.ctx);

        let unverified = blogs.create(author, create_request("Unverified")).await.unwrap();
        fx.blogs.set_flags(unverified.id.parse().unwrap(), false, true);

        let mut request = create_request("Scheduled");
        request.schedule = Some(chrono::Utc::now() + chrono::Duration::hours(1));
        let scheduled = blogs.create(author, request).await.unwrap();
        fx.blogs.set_flags(scheduled.id.parse().unwrap(), true, true);

        let page = HomepageService::new(&fx.ctx).get().await.unwrap();
        assert!(page.blogs.is_empty());
        assert!(page.course_fe.is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_without_cache_is_noop() {
        let fx = Fixture::new(true);
        assert!(fx.ctx.homepage_cache().is_none());
        HomepageService::new(&fx.ctx).invalidate().await;
    }

    #[tokio::test]
    async fn test_homepage_blog_limit() {
        let fx = Fixture::with_settings(BlogSettings {
            auto_verify: true,
            homepage_blog_limit: Some(2),
            ..BlogSettings::default()
        });
        let author = fx.user(1, "ada").await;
        let blogs = BlogService::new(&fx.ctx);
        for title in ["One", "Two", "Three"] {
            let blog = blogs.create(author, create_request(title)).await.unwrap();
            fx.blogs.set_flags(blog.id.parse().unwrap(), true, true);
        }

        let page = HomepageService::new(&fx.ctx).get().await.unwrap();
        assert_eq!(page.blogs.len(), 2);

        let unbounded = Fixture::new(true);
        assert!(unbounded.ctx.settings().homepage_blog_limit.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_cache_never_fails_requests() {
        let fx = Fixture::with_unreachable_cache(true);
        assert!(fx.ctx.homepage_cache().is_some());
        let author = fx.user(1, "ada").await;
        let blogs = BlogService::new(&fx.ctx);
        let homepage = HomepageService::new(&fx.ctx);

        let created = blogs.create(author, create_request("Cached")).await.unwrap();
        let id: Snowflake = created.id.parse().unwrap();
        fx.blogs.set_flags(id, true, true);

        let page = homepage.get().await.unwrap();
        assert_eq!(page.blogs.len(), 1);

        blogs
            .edit(
                author,
                id,
                EditBlogRequest {
                    title: "Edited".into(),
                    content: "New body".into(),
                },
            )
            .await
            .unwrap();
        blogs.delete(author, id).await.unwrap();
        homepage.invalidate().await;

        assert!(homepage.get().await.unwrap().blogs.is_empty());
    }

    async fn is_cached(cache: &HomepageCache) -> bool {
        cache.load::<HomepageResponse>().await.unwrap().is_some()
    }

    #[tokio::test]
    async fn test_writes_drop_cached_snapshot() {
        let Some(cache) = live_cache() else {
            eprintln!("Skipping test: REDIS_URL not set");
            return;
        };
        let fx = Fixture::with_cache(true, cache.clone());
        let author = fx.user(1, "ada").await;
        let blogs = BlogService::new(&fx.ctx);
        let homepage = HomepageService::new(&fx.ctx);

        homepage.invalidate().await;
        homepage.get().await.unwrap();
        assert!(is_cached(&cache).await);

        let created = blogs.create(author, create_request("Fresh")).await.unwrap();
        let id: Snowflake = created.id.parse().unwrap();
        assert!(!is_cached(&cache).await);

        homepage.get().await.unwrap();
        blogs
            .edit(
                author,
                id,
                EditBlogRequest {
                    title: "Edited".into(),
                    content: "Body".into(),
                },
            )
            .await
            .unwrap();
        assert!(!is_cached(&cache).await);

        homepage.get().await.unwrap();
        blogs.delete(author, id).await.unwrap();
        assert!(!is_cached(&cache).await);

        // A scheduled popular blog going public drops the snapshot too
        let mut request = create_request("Later");
        request.schedule = Some(chrono::Utc::now() + chrono::Duration::milliseconds(200));
        let scheduled = blogs.create(author, request).await.unwrap();
        fx.blogs.set_flags(scheduled.id.parse().unwrap(), true, true);
        let page = homepage.get().await.unwrap();
        assert!(page.blogs.is_empty());
        assert!(is_cached(&cache).await);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(!is_cached(&cache).await);
        let page = homepage.get().await.unwrap();
        assert_eq!(page.blogs.len(), 1);
        assert_eq!(page.blogs[0].id, scheduled.id);

        homepage.invalidate().await;
    }
}
