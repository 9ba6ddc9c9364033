//! Blog service
//!
//! Publishing, reading, editing, deleting and liking blogs.

use blog_core::entities::Blog;
use blog_core::{DomainError, Slug, Snowflake};
use tracing::{info, instrument};

use crate::dto::mappers::AuthorDirectory;
use crate::dto::{
    BlogResponse, BlogSlugResponse, CreateBlogRequest, EditBlogRequest, LikesResponse,
    RelatedBlogResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::homepage::HomepageService;

pub struct BlogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BlogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a blog. A future `schedule` keeps it out of public reads until
    /// the publish job clears the marker.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(
        &self,
        author_id: Snowflake,
        request: CreateBlogRequest,
    ) -> ServiceResult<BlogResponse> {
        let slug = match request.slug.as_deref() {
            Some(slug) => {
                let slug = Slug::parse(slug).map_err(|e| DomainError::InvalidSlug(e.to_string()))?;
                if self.ctx.blog_repo().slug_exists(slug.as_str()).await? {
                    return Err(DomainError::SlugAlreadyExists(slug.into_inner()).into());
                }
                slug
            }
            None => Slug::from_title(&request.title),
        };

        let mut blog = Blog::new(
            self.ctx.generate_id(),
            author_id,
            slug.into_inner(),
            request.title,
            request.content,
        );
        if let Some(title_display) = request.title_display {
            blog.title_display = title_display;
        }
        blog.image = request.image;
        blog.reading_time = request.reading_time.unwrap_or_default();
        blog.tags = request.tags;
        blog.is_posted = request.is_posted.unwrap_or(true);
        blog.is_verified = self.ctx.settings().auto_verify;
        blog.schedule = request.schedule;

        self.ctx.blog_repo().create(&blog).await?;

        if let Some(at) = blog.schedule {
            self.ctx.scheduler().schedule(blog.id, at);
        }
        HomepageService::new(self.ctx).invalidate().await;

        info!(
            blog_id = %blog.id,
            author_id = %author_id,
            slug = %blog.slug,
            visibility = ?blog.visibility(),
            "Blog created"
        );

        Ok(BlogResponse::raw(blog))
    }

    /// Public blogs, newest first
    #[instrument(skip(self))]
    pub async fn list_published(&self) -> ServiceResult<Vec<BlogResponse>> {
        let blogs = self.ctx.blog_repo().list_public().await?;
        self.with_authors(blogs).await
    }

    /// Public blogs carrying `tag`, newest first
    #[instrument(skip(self))]
    pub async fn list_by_tag(&self, tag: &str) -> ServiceResult<Vec<BlogResponse>> {
        let blogs = self.ctx.blog_repo().list_public_by_tag(tag).await?;
        self.with_authors(blogs).await
    }

    /// A readable blog with its comment tree expanded, plus the popular
    /// sidebar. A slug that matches nothing readable yields `blogSlug: null`.
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> ServiceResult<BlogSlugResponse> {
        let (blog, popular) = tokio::try_join!(
            self.ctx.blog_repo().find_readable_by_slug(slug),
            self.ctx
                .blog_repo()
                .list_popular(self.ctx.settings().popular_sidebar_limit.map(i64::from)),
        )?;

        let mut ids: Vec<Snowflake> = popular.iter().map(|b| b.author_id).collect();
        if let Some(blog) = &blog {
            ids.push(blog.author_id);
            ids.extend(blog.comment_participants());
        }
        let authors = AuthorDirectory::load(self.ctx.user_repo(), ids).await?;

        Ok(BlogSlugResponse {
            blog_slug: blog.map(|b| BlogResponse::expanded(b, &authors)),
            blog_highlight: popular
                .into_iter()
                .map(|b| BlogResponse::with_author(b, &authors))
                .collect(),
        })
    }

    /// The stored blog regardless of schedule or draft state, for its author
    #[instrument(skip(self))]
    pub async fn get_for_edit(&self, actor_id: Snowflake, slug: &str) -> ServiceResult<BlogResponse> {
        let blog = self
            .ctx
            .blog_repo()
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::BlogSlugNotFound(slug.to_string()))?;

        if !blog.is_authored_by(actor_id) {
            return Err(DomainError::NotBlogAuthor.into());
        }

        Ok(BlogResponse::raw(blog))
    }

    /// Overwrite title and content
    #[instrument(skip(self, request))]
    pub async fn edit(
        &self,
        actor_id: Snowflake,
        blog_id: Snowflake,
        request: EditBlogRequest,
    ) -> ServiceResult<()> {
        self.require_author(actor_id, blog_id).await?;

        let updated = self
            .ctx
            .blog_repo()
            .update_content(blog_id, &request.title, &request.content)
            .await?;
        if !updated {
            return Err(DomainError::BlogNotFound(blog_id).into());
        }

        HomepageService::new(self.ctx).invalidate().await;
        info!(blog_id = %blog_id, "Blog edited");
        Ok(())
    }

    /// Delete a blog and cancel its publish job. Returns the author's
    /// remaining blogs.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        actor_id: Snowflake,
        blog_id: Snowflake,
    ) -> ServiceResult<Vec<BlogResponse>> {
        self.require_author(actor_id, blog_id).await?;

        if !self.ctx.blog_repo().delete(blog_id).await? {
            return Err(DomainError::BlogNotFound(blog_id).into());
        }
        self.ctx.scheduler().cancel(blog_id);
        HomepageService::new(self.ctx).invalidate().await;

        info!(blog_id = %blog_id, author_id = %actor_id, "Blog deleted");

        let remaining = self.ctx.blog_repo().list_by_author(actor_id).await?;
        Ok(remaining.into_iter().map(BlogResponse::raw).collect())
    }

    /// Other readable blogs of the same author
    #[instrument(skip(self))]
    pub async fn related(
        &self,
        blog_id: Snowflake,
        author_id: Snowflake,
    ) -> ServiceResult<Vec<RelatedBlogResponse>> {
        let links = self.ctx.blog_repo().list_related(author_id, blog_id).await?;
        Ok(links.into_iter().map(RelatedBlogResponse::from).collect())
    }

    /// Like the blog, or take the like back
    #[instrument(skip(self))]
    pub async fn toggle_like(
        &self,
        actor_id: Snowflake,
        blog_id: Snowflake,
    ) -> ServiceResult<LikesResponse> {
        let likes = self
            .ctx
            .blog_repo()
            .toggle_like(blog_id, actor_id)
            .await?
            .ok_or(DomainError::BlogNotFound(blog_id))?;

        info!(
            blog_id = %blog_id,
            user_id = %actor_id,
            liked = likes.likes.contains(&actor_id),
            "Blog like toggled"
        );
        Ok(LikesResponse::from(likes))
    }

    /// Re-arm publish jobs for blogs still carrying a schedule
    pub async fn restore_schedules(&self) -> ServiceResult<usize> {
        self.ctx.scheduler().restore().await
    }

    async fn require_author(&self, actor_id: Snowflake, blog_id: Snowflake) -> ServiceResult<Blog> {
        let blog = self
            .ctx
            .blog_repo()
            .find_by_id(blog_id)
            .await?
            .ok_or(DomainError::BlogNotFound(blog_id))?;

        if !blog.is_authored_by(actor_id) {
            return Err(DomainError::NotBlogAuthor.into());
        }
        Ok(blog)
    }

    async fn with_authors(&self, blogs: Vec<Blog>) -> ServiceResult<Vec<BlogResponse>> {
        let authors = AuthorDirectory::load(
            self.ctx.user_repo(),
            blogs.iter().map(|b| b.author_id).collect(),
        )
        .await?;
        Ok(blogs
            .into_iter()
            .map(|b| BlogResponse::with_author(b, &authors))
            .collect())
    }
}
