//! Entity to DTO mappers
//!
//! Raw conversions leave every user reference as an id. Expanded conversions
//! resolve references through an [`AuthorDirectory`] loaded once per request.

use std::collections::HashMap;

use blog_core::entities::{Blog, Comment, Course, Reaction, Reply, User, Video};
use blog_core::traits::{BlogLikes, BlogLink, RepoResult, UserRepository};
use blog_core::Snowflake;

use super::responses::{
    AuthorRef, AuthorResponse, BlogResponse, CommentResponse, CommenterResponse,
    CourseSummaryResponse, HomepageBlogResponse, LikesResponse, ReactionResponse,
    RelatedBlogResponse, ReplyResponse, VideoResponse,
};

// ============================================================================
// Author Directory
// ============================================================================

/// Users referenced by one response, keyed by id
#[derive(Debug, Default)]
pub struct AuthorDirectory {
    users: HashMap<Snowflake, User>,
}

impl AuthorDirectory {
    /// Fetch every referenced user in one query
    pub async fn load(repo: &dyn UserRepository, mut ids: Vec<Snowflake>) -> RepoResult<Self> {
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self::from_users(repo.find_by_ids(&ids).await?))
    }

    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }

    pub fn author(&self, id: Snowflake) -> AuthorRef<AuthorResponse> {
        self.users
            .get(&id)
            .map_or(AuthorRef::Missing, |u| AuthorRef::Expanded(AuthorResponse::from(u)))
    }

    pub fn commenter(&self, id: Snowflake) -> AuthorRef<CommenterResponse> {
        self.users
            .get(&id)
            .map_or(AuthorRef::Missing, |u| AuthorRef::Expanded(CommenterResponse::from(u)))
    }
}

/// Users referenced anywhere in a comment list
pub fn comment_participants(comments: &[Comment]) -> Vec<Snowflake> {
    comments.iter().flat_map(Comment::participants).collect()
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for AuthorResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name.clone(),
            bio: user.bio.clone(),
            photo_url: user.photo_url.clone(),
        }
    }
}

impl From<&User> for CommenterResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name.clone(),
            photo_url: user.photo_url.clone(),
        }
    }
}

fn raw<T>(id: Snowflake) -> AuthorRef<T> {
    AuthorRef::Id(id.to_string())
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            posted_by: raw(comment.author_id),
            content: comment.content,
            is_code: comment.is_code,
            created_at: comment.created_at,
            replies: comment.replies.into_iter().map(ReplyResponse::from).collect(),
            reacts: comment.reactions.into_iter().map(ReactionResponse::from).collect(),
        }
    }
}

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        Self {
            id: reply.id.to_string(),
            posted_by: raw(reply.author_id),
            content: reply.content,
            is_code: reply.is_code,
            created_at: reply.created_at,
        }
    }
}

impl From<Reaction> for ReactionResponse {
    fn from(reaction: Reaction) -> Self {
        Self {
            emoji: reaction.emoji,
            reacted_by: raw(reaction.reactor_id),
            created_at: reaction.created_at,
        }
    }
}

impl CommentResponse {
    /// Comment with its author, repliers and reactors resolved
    pub fn expanded(comment: Comment, authors: &AuthorDirectory) -> Self {
        Self {
            id: comment.id.to_string(),
            posted_by: authors.commenter(comment.author_id),
            content: comment.content,
            is_code: comment.is_code,
            created_at: comment.created_at,
            replies: ReplyResponse::expanded_all(comment.replies, authors),
            reacts: comment
                .reactions
                .into_iter()
                .map(|r| ReactionResponse {
                    reacted_by: authors.commenter(r.reactor_id),
                    emoji: r.emoji,
                    created_at: r.created_at,
                })
                .collect(),
        }
    }

    pub fn expanded_all(comments: Vec<Comment>, authors: &AuthorDirectory) -> Vec<Self> {
        comments
            .into_iter()
            .map(|c| Self::expanded(c, authors))
            .collect()
    }
}

impl ReplyResponse {
    pub fn expanded_all(replies: Vec<Reply>, authors: &AuthorDirectory) -> Vec<Self> {
        replies
            .into_iter()
            .map(|r| Self {
                posted_by: authors.commenter(r.author_id),
                ..Self::from(r)
            })
            .collect()
    }
}

// ============================================================================
// Blog Mappers
// ============================================================================

impl BlogResponse {
    fn build(blog: Blog, posted_by: AuthorRef<AuthorResponse>, comments: Vec<CommentResponse>) -> Self {
        Self {
            id: blog.id.to_string(),
            slug: blog.slug,
            title: blog.title,
            title_display: blog.title_display,
            content: blog.content,
            image: blog.image,
            reading_time: blog.reading_time,
            posted_by,
            tags: blog.tags,
            is_posted: blog.is_posted,
            is_verified: blog.is_verified,
            is_popular: blog.is_popular,
            schedule: blog.schedule,
            likes: blog.likes.iter().map(ToString::to_string).collect(),
            comments,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }

    /// Every user reference left as an id
    pub fn raw(mut blog: Blog) -> Self {
        let comments = std::mem::take(&mut blog.comments)
            .into_iter()
            .map(CommentResponse::from)
            .collect();
        let author = raw(blog.author_id);
        Self::build(blog, author, comments)
    }

    /// Blog author resolved, comment tree left raw
    pub fn with_author(mut blog: Blog, authors: &AuthorDirectory) -> Self {
        let comments = std::mem::take(&mut blog.comments)
            .into_iter()
            .map(CommentResponse::from)
            .collect();
        let author = authors.author(blog.author_id);
        Self::build(blog, author, comments)
    }

    /// Blog author and the whole comment tree resolved
    pub fn expanded(mut blog: Blog, authors: &AuthorDirectory) -> Self {
        let comments = CommentResponse::expanded_all(std::mem::take(&mut blog.comments), authors);
        let author = authors.author(blog.author_id);
        Self::build(blog, author, comments)
    }
}

impl From<BlogLikes> for LikesResponse {
    fn from(likes: BlogLikes) -> Self {
        Self {
            id: likes.id.to_string(),
            slug: likes.slug,
            posted_by: likes.author_id.to_string(),
            likes: likes.likes.iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<BlogLink> for RelatedBlogResponse {
    fn from(link: BlogLink) -> Self {
        Self {
            id: link.id.to_string(),
            slug: link.slug,
            title_display: link.title_display,
        }
    }
}

// ============================================================================
// Homepage Mappers
// ============================================================================

impl From<Course> for CourseSummaryResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            slug: course.slug,
            image: course.image,
            title: course.title,
            student_count: course.student_count,
        }
    }
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self {
            id: video.id.to_string(),
            slug: video.slug,
            title: video.title,
            thumbnail: video.thumbnail,
            is_popular: video.is_popular,
            created_at: video.created_at,
        }
    }
}

impl HomepageBlogResponse {
    pub fn new(blog: Blog, authors: &AuthorDirectory) -> Self {
        Self {
            posted_by: authors.author(blog.author_id),
            id: blog.id.to_string(),
            slug: blog.slug,
            title: blog.title,
            title_display: blog.title_display,
            image: blog.image,
            reading_time: blog.reading_time,
        }
    }
}
