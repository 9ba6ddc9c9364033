//! Repository traits (ports) - define the interface for data access
//!
//! The Blog aggregate owns its comment tree, so every comment, reply and
//! reaction mutation goes through [`BlogRepository`] and is expected to be a
//! single atomic update of the blog record.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Blog, Comment, Course, CourseTrack, Reaction, Reply, User, Video};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Projection returned by a like toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogLikes {
    pub id: Snowflake,
    pub slug: String,
    pub author_id: Snowflake,
    pub likes: Vec<Snowflake>,
}

/// Minimal link to a blog, used for "more from this author"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogLink {
    pub id: Snowflake,
    pub slug: String,
    pub title_display: String,
}

/// A blog whose schedule marker has not been cleared yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSchedule {
    pub blog_id: Snowflake,
    pub at: DateTime<Utc>,
}

// ============================================================================
// Blog Repository
// ============================================================================

/// Soft-deleted blogs are invisible to every method.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Find blog by ID regardless of visibility
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Blog>>;

    /// Find blog by slug regardless of visibility
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Blog>>;

    /// Find a posted, unscheduled blog by slug
    async fn find_readable_by_slug(&self, slug: &str) -> RepoResult<Option<Blog>>;

    /// Check if slug is already taken
    async fn slug_exists(&self, slug: &str) -> RepoResult<bool>;

    /// Create a new blog
    async fn create(&self, blog: &Blog) -> RepoResult<()>;

    /// Overwrite title and content. Returns false when the blog does not exist.
    async fn update_content(&self, id: Snowflake, title: &str, content: &str) -> RepoResult<bool>;

    /// Soft delete a blog. Returns false when the blog does not exist.
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;

    /// Public blogs, newest first
    async fn list_public(&self) -> RepoResult<Vec<Blog>>;

    /// Public blogs carrying `tag`, newest first
    async fn list_public_by_tag(&self, tag: &str) -> RepoResult<Vec<Blog>>;

    /// Every blog of an author, newest first
    async fn list_by_author(&self, author_id: Snowflake) -> RepoResult<Vec<Blog>>;

    /// Popular, posted, unscheduled blogs (verification not required), at
    /// most `limit` of them when given
    async fn list_popular(&self, limit: Option<i64>) -> RepoResult<Vec<Blog>>;

    /// Popular public blogs, newest first, at most `limit` when given
    async fn list_popular_public(&self, limit: Option<i64>) -> RepoResult<Vec<Blog>>;

    /// Other posted, unscheduled blogs of the same author
    async fn list_related(
        &self,
        author_id: Snowflake,
        exclude: Snowflake,
    ) -> RepoResult<Vec<BlogLink>>;

    /// Atomically add or remove `user_id` from the likers.
    /// Returns None when the blog does not exist.
    async fn toggle_like(
        &self,
        blog_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<BlogLikes>>;

    /// Prepend a comment. Returns the updated comment list.
    async fn add_comment(
        &self,
        blog_id: Snowflake,
        comment: &Comment,
    ) -> RepoResult<Option<Vec<Comment>>>;

    /// Prepend a reply to the comment. Returns that comment's replies,
    /// or None when the (blog, comment) pair matches nothing.
    async fn add_reply(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
        reply: &Reply,
    ) -> RepoResult<Option<Vec<Reply>>>;

    /// Append a reaction to the comment. Returns the updated comment list.
    async fn add_reaction(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
        reaction: &Reaction,
    ) -> RepoResult<Option<Vec<Comment>>>;

    /// Overwrite content and code flag of the comment
    async fn update_comment(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
        content: &str,
        is_code: bool,
    ) -> RepoResult<Option<Vec<Comment>>>;

    /// Remove the comment. Returns the remaining comments.
    async fn remove_comment(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
    ) -> RepoResult<Option<Vec<Comment>>>;

    /// Clear the schedule marker. Returns false when the blog does not exist.
    async fn clear_schedule(&self, id: Snowflake) -> RepoResult<bool>;

    /// Blogs still carrying a schedule marker
    async fn pending_schedules(&self) -> RepoResult<Vec<PendingSchedule>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find users by ID; missing ids are skipped
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Course Repository
// ============================================================================

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Courses on a track, in insertion order
    async fn list_by_track(&self, track: CourseTrack) -> RepoResult<Vec<Course>>;

    /// Create a new course
    async fn create(&self, course: &Course) -> RepoResult<()>;
}

// ============================================================================
// Video Repository
// ============================================================================

#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Popular videos, newest first
    async fn list_popular(&self) -> RepoResult<Vec<Video>>;

    /// Create a new video
    async fn create(&self, video: &Video) -> RepoResult<()>;
}
