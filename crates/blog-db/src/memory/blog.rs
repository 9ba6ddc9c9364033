//! In-memory BlogRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use blog_core::entities::{Blog, Comment, Reaction, Reply};
use blog_core::traits::{BlogLikes, BlogLink, BlogRepository, PendingSchedule, RepoResult};
use blog_core::value_objects::Snowflake;
use blog_core::DomainError;

#[derive(Debug, Default)]
pub struct MemoryBlogRepository {
    /// Soft-deleted blogs are moved to `deleted` and never read again
    blogs: RwLock<HashMap<Snowflake, Blog>>,
    deleted: RwLock<Vec<Snowflake>>,
}

impl MemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of soft-deleted blogs
    pub fn deleted_count(&self) -> usize {
        self.deleted.read().len()
    }

    /// Overwrite stored flags, standing in for the external verification step
    pub fn set_flags(&self, id: Snowflake, verified: bool, popular: bool) -> bool {
        match self.blogs.write().get_mut(&id) {
            Some(blog) => {
                blog.is_verified = verified;
                blog.is_popular = popular;
                true
            }
            None => false,
        }
    }

    /// Matching blogs, newest first
    fn collect<F>(&self, keep: F) -> Vec<Blog>
    where
        F: Fn(&Blog) -> bool,
    {
        let mut blogs: Vec<Blog> = self
            .blogs
            .read()
            .values()
            .filter(|b| keep(b))
            .cloned()
            .collect();
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        blogs
    }

    /// Run `f` on the comment identified by (blog_id, comment_id) under the
    /// write lock; `None` when the pair matches nothing
    fn with_comment<T, F>(&self, blog_id: Snowflake, comment_id: Snowflake, f: F) -> Option<T>
    where
        F: FnOnce(&mut Blog) -> T,
    {
        let mut blogs = self.blogs.write();
        let blog = blogs.get_mut(&blog_id)?;
        blog.find_comment(comment_id)?;
        let out = f(blog);
        blog.updated_at = chrono::Utc::now();
        Some(out)
    }
}

#[async_trait]
impl BlogRepository for MemoryBlogRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Blog>> {
        Ok(self.blogs.read().get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Blog>> {
        Ok(self.blogs.read().values().find(|b| b.slug == slug).cloned())
    }

    async fn find_readable_by_slug(&self, slug: &str) -> RepoResult<Option<Blog>> {
        Ok(self
            .blogs
            .read()
            .values()
            .find(|b| b.slug == slug && b.is_readable())
            .cloned())
    }

    async fn slug_exists(&self, slug: &str) -> RepoResult<bool> {
        Ok(self.blogs.read().values().any(|b| b.slug == slug))
    }

    async fn create(&self, blog: &Blog) -> RepoResult<()> {
        let mut blogs = self.blogs.write();
        if blogs.values().any(|b| b.slug == blog.slug) {
            return Err(DomainError::SlugAlreadyExists(blog.slug.clone()));
        }
        blogs.insert(blog.id, blog.clone());
        Ok(())
    }

    async fn update_content(&self, id: Snowflake, title: &str, content: &str) -> RepoResult<bool> {
        Ok(match self.blogs.write().get_mut(&id) {
            Some(blog) => {
                blog.edit(title.to_string(), content.to_string());
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        let removed = self.blogs.write().remove(&id).is_some();
        if removed {
            self.deleted.write().push(id);
        }
        Ok(removed)
    }

    async fn list_public(&self) -> RepoResult<Vec<Blog>> {
        Ok(self.collect(Blog::is_public))
    }

    async fn list_public_by_tag(&self, tag: &str) -> RepoResult<Vec<Blog>> {
        Ok(self.collect(|b| b.is_public() && b.has_tag(tag)))
    }

    async fn list_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Blog>> {
        Ok(self.collect(|b| b.is_authored_by(author_id)))
    }

    async fn list_popular(&self, limit: Option<i64>) -> RepoResult<Vec<Blog>> {
        let mut blogs = self.collect(|b| b.is_popular && b.is_readable());
        truncate(&mut blogs, limit);
        Ok(blogs)
    }

    async fn list_popular_public(&self, limit: Option<i64>) -> RepoResult<Vec<Blog>> {
        let mut blogs = self.collect(|b| b.is_popular && b.is_public());
        truncate(&mut blogs, limit);
        Ok(blogs)
    }

    async fn list_related(
        &self,
        author_id: Snowflake,
        exclude: Snowflake,
    ) -> RepoResult<Vec<BlogLink>> {
        Ok(self
            .collect(|b| b.is_authored_by(author_id) && b.id != exclude && b.is_readable())
            .into_iter()
            .map(|b| BlogLink {
                id: b.id,
                slug: b.slug,
                title_display: b.title_display,
            })
            .collect())
    }

    async fn toggle_like(
        &self,
        blog_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<BlogLikes>> {
        Ok(self.blogs.write().get_mut(&blog_id).map(|blog| {
            blog.toggle_like(user_id);
            BlogLikes {
                id: blog.id,
                slug: blog.slug.clone(),
                author_id: blog.author_id,
                likes: blog.likes.clone(),
            }
        }))
    }

    async fn add_comment(
        &self,
        blog_id: Snowflake,
        comment: &Comment,
    ) -> RepoResult<Option<Vec<Comment>>> {
        Ok(self.blogs.write().get_mut(&blog_id).map(|blog| {
            blog.add_comment(comment.clone());
            blog.updated_at = chrono::Utc::now();
            blog.comments.clone()
        }))
    }

    async fn add_reply(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
        reply: &Reply,
    ) -> RepoResult<Option<Vec<Reply>>> {
        Ok(self
            .with_comment(blog_id, comment_id, |blog| {
                blog.find_comment_mut(comment_id).map(|comment| {
                    comment.add_reply(reply.clone());
                    comment.replies.clone()
                })
            })
            .flatten())
    }

    async fn add_reaction(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
        reaction: &Reaction,
    ) -> RepoResult<Option<Vec<Comment>>> {
        Ok(self.with_comment(blog_id, comment_id, |blog| {
            if let Some(comment) = blog.find_comment_mut(comment_id) {
                comment.add_reaction(reaction.clone());
            }
            blog.comments.clone()
        }))
    }

    async fn update_comment(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
        content: &str,
        is_code: bool,
    ) -> RepoResult<Option<Vec<Comment>>> {
        Ok(self.with_comment(blog_id, comment_id, |blog| {
            if let Some(comment) = blog.find_comment_mut(comment_id) {
                comment.edit(content.to_string(), is_code);
            }
            blog.comments.clone()
        }))
    }

    async fn remove_comment(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
    ) -> RepoResult<Option<Vec<Comment>>> {
        Ok(self.with_comment(blog_id, comment_id, |blog| {
            blog.remove_comment(comment_id);
            blog.comments.clone()
        }))
    }

    async fn clear_schedule(&self, id: Snowflake) -> RepoResult<bool> {
        Ok(match self.blogs.write().get_mut(&id) {
            Some(blog) => {
                blog.schedule = None;
                true
            }
            None => false,
        })
    }

    async fn pending_schedules(&self) -> RepoResult<Vec<PendingSchedule>> {
        let mut pending: Vec<PendingSchedule> = self
            .blogs
            .read()
            .values()
            .filter_map(|b| {
                b.schedule.map(|at| PendingSchedule {
                    blog_id: b.id,
                    at,
                })
            })
            .collect();
        pending.sort_by_key(|p| p.at);
        Ok(pending)
    }
}

fn truncate(blogs: &mut Vec<Blog>, limit: Option<i64>) {
    if let Some(limit) = limit {
        blogs.truncate(usize::try_from(limit).unwrap_or(0));
    }
}
