//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Keys are camelCase; ids are accepted as strings or numbers.

use blog_core::Snowflake;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Blog Requests
// ============================================================================

/// Publish a new blog
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    /// Derived from the title when absent
    pub slug: Option<String>,

    #[validate(length(min = 1, max = 300, message = "Display title must be 1-300 characters"))]
    pub title_display: Option<String>,

    #[validate(url(message = "Image must be a URL"))]
    pub image: Option<String>,

    /// Minutes
    #[validate(range(min = 0, max = 600, message = "Reading time must be 0-600 minutes"))]
    pub reading_time: Option<i32>,

    #[serde(default)]
    #[validate(length(max = 10, message = "At most 10 tags"))]
    pub tags: Vec<String>,

    /// Defaults to true; false keeps the blog as a draft
    pub is_posted: Option<bool>,

    /// Keep the blog out of public reads until this instant
    pub schedule: Option<DateTime<Utc>>,
}

/// Overwrite title and content
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditBlogRequest {
    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub blog_id: Snowflake,
}

// ============================================================================
// Comment Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub blog_id: Snowflake,

    #[validate(length(min = 1, max = 10000, message = "Comment must be 1-10000 characters"))]
    pub content: String,

    #[serde(default)]
    pub is_code: bool,
}

/// Identifies one comment of one blog
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentTarget {
    pub blog_id: Snowflake,
    pub comment_id: Snowflake,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub blog_id: Snowflake,
    pub comment_id: Snowflake,

    #[validate(length(min = 1, max = 10000, message = "Reply must be 1-10000 characters"))]
    pub content: String,

    #[serde(default)]
    pub is_code: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReactRequest {
    pub blog_id: Snowflake,
    pub comment_id: Snowflake,

    #[validate(length(min = 1, max = 32, message = "Emoji must be 1-32 characters"))]
    pub emoji: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EditCommentRequest {
    pub blog_id: Snowflake,
    pub comment_id: Snowflake,

    #[validate(length(min = 1, max = 10000, message = "Comment must be 1-10000 characters"))]
    pub content: String,

    #[serde(default)]
    pub is_code: bool,
}
