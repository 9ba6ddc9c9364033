//! Test fixtures and data generators
//!
//! Request bodies and the response shapes the tests read back. Keys are
//! camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<DateTime<Utc>>,
}

impl NewPostRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Post {suffix}"),
            content: "Some words about Rust".to_string(),
            slug: Some(format!("post-{suffix}")),
            tags: vec!["rust".to_string()],
            schedule: None,
        }
    }

    pub fn scheduled(at: DateTime<Utc>) -> Self {
        Self {
            schedule: Some(at),
            ..Self::unique()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditPostRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogIdBody {
    pub blog_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    pub blog_id: String,
    pub content: String,
    pub is_code: bool,
}

impl CommentBody {
    pub fn text(blog_id: &str, content: &str) -> Self {
        Self {
            blog_id: blog_id.to_string(),
            content: content.to_string(),
            is_code: false,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentTargetBody {
    pub blog_id: String,
    pub comment_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyBody {
    pub blog_id: String,
    pub comment_id: String,
    pub content: String,
    pub is_code: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactBody {
    pub blog_id: String,
    pub comment_id: String,
    pub emoji: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCommentBody {
    pub blog_id: String,
    pub comment_id: String,
    pub content: String,
    pub is_code: bool,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreatePostResponse {
    pub success: bool,
    pub message: String,
    pub blog: BlogBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogBody {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub posted_by: serde_json::Value,
    pub is_verified: bool,
    pub schedule: Option<DateTime<Utc>>,
    pub likes: Vec<String>,
    pub comments: Vec<CommentBodyResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentBodyResponse {
    pub id: String,
    pub posted_by: serde_json::Value,
    pub content: String,
    pub replies: Vec<ReplyBodyResponse>,
    pub reacts: Vec<ReactionBodyResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyBodyResponse {
    pub id: String,
    pub posted_by: serde_json::Value,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionBodyResponse {
    pub emoji: String,
    pub reacted_by: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSlugBody {
    pub blog_slug: Option<BlogBody>,
    pub blog_highlight: Vec<BlogBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesBody {
    pub id: String,
    pub slug: String,
    pub posted_by: String,
    pub likes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentsBody {
    pub id: String,
    pub comments: Vec<CommentBodyResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepliesBody {
    pub blog_id: String,
    pub comment_id: String,
    pub replies: Vec<ReplyBodyResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedBody {
    pub id: String,
    pub slug: String,
    pub title_display: String,
}

#[derive(Debug, Deserialize)]
pub struct SuccessBody {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub code: String,
}
