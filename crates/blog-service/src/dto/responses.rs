//! Response DTOs for API endpoints
//!
//! Keys are camelCase. Snowflake IDs are serialized as strings for
//! JavaScript compatibility. Homepage types also implement `Deserialize`
//! so the joined snapshot can be cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Author References
// ============================================================================

/// A user reference as stored or as expanded at read time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef<T> {
    Expanded(T),
    /// Not expanded; the raw user id
    Id(String),
    /// Expanded, but the user no longer exists. Serializes as `null`.
    Missing,
}

impl<T> AuthorRef<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn expanded(&self) -> Option<&T> {
        match self {
            Self::Expanded(author) => Some(author),
            _ => None,
        }
    }
}

/// Blog author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: String,
    pub full_name: String,
    pub bio: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Author of a comment, reply or reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommenterResponse {
    pub id: String,
    pub full_name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

// ============================================================================
// Blog Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub title_display: String,
    pub content: String,
    pub image: Option<String>,
    pub reading_time: i32,
    pub posted_by: AuthorRef<AuthorResponse>,
    pub tags: Vec<String>,
    pub is_posted: bool,
    pub is_verified: bool,
    pub is_popular: bool,
    pub schedule: Option<DateTime<Utc>>,
    pub likes: Vec<String>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub posted_by: AuthorRef<CommenterResponse>,
    pub content: String,
    pub is_code: bool,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<ReplyResponse>,
    pub reacts: Vec<ReactionResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    pub id: String,
    pub posted_by: AuthorRef<CommenterResponse>,
    pub content: String,
    pub is_code: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub emoji: String,
    pub reacted_by: AuthorRef<CommenterResponse>,
    pub created_at: DateTime<Utc>,
}

/// `POST /new-post`
#[derive(Debug, Serialize)]
pub struct CreateBlogResponse {
    pub success: bool,
    pub message: &'static str,
    pub blog: BlogResponse,
}

impl CreateBlogResponse {
    pub fn new(blog: BlogResponse) -> Self {
        Self {
            success: true,
            message: "Post blog successfully!",
            blog,
        }
    }
}

/// Bare success acknowledgement
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: &'static str,
}

impl SuccessResponse {
    pub fn new(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

/// Blog by slug with the popular sidebar. `blogSlug` is null when no
/// readable blog has the slug.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSlugResponse {
    pub blog_slug: Option<BlogResponse>,
    pub blog_highlight: Vec<BlogResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedBlogResponse {
    pub id: String,
    pub slug: String,
    pub title_display: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikesResponse {
    pub id: String,
    pub slug: String,
    pub posted_by: String,
    pub likes: Vec<String>,
}

/// Comment list of a blog after a comment mutation
#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    /// Blog id
    pub id: String,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepliesResponse {
    pub blog_id: String,
    pub comment_id: String,
    pub replies: Vec<ReplyResponse>,
}

// ============================================================================
// Homepage Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummaryResponse {
    pub id: String,
    pub slug: String,
    pub image: Option<String>,
    pub title: String,
    pub student_count: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageBlogResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub title_display: String,
    pub image: Option<String>,
    pub posted_by: AuthorRef<AuthorResponse>,
    pub reading_time: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub is_popular: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomepageResponse {
    #[serde(rename = "courseFE")]
    pub course_fe: Vec<CourseSummaryResponse>,
    #[serde(rename = "courseBE")]
    pub course_be: Vec<CourseSummaryResponse>,
    pub blogs: Vec<HomepageBlogResponse>,
    pub videos: Vec<VideoResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    /// `None` marks a dependency that is not configured
    pub fn ready(database: Option<bool>, redis: Option<bool>) -> Self {
        let label = |check: Option<bool>| match check {
            Some(true) => "healthy",
            Some(false) => "unhealthy",
            None => "disabled",
        };
        let all_healthy = database != Some(false) && redis != Some(false);
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: label(database).to_string(),
                redis: label(redis).to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_author_ref_shapes() {
        let expanded: AuthorRef<CommenterResponse> = AuthorRef::Expanded(CommenterResponse {
            id: "1".into(),
            full_name: "Ada".into(),
            photo_url: None,
        });
        assert_eq!(
            serde_json::to_value(&expanded).unwrap(),
            json!({"id": "1", "fullName": "Ada", "photoURL": null})
        );

        let raw: AuthorRef<CommenterResponse> = AuthorRef::Id("1".into());
        assert_eq!(serde_json::to_value(&raw).unwrap(), json!("1"));

        let missing: AuthorRef<CommenterResponse> = AuthorRef::Missing;
        assert_eq!(serde_json::to_value(&missing).unwrap(), json!(null));
    }

    #[test]
    fn test_author_ref_reads_back() {
        let value: AuthorRef<AuthorResponse> = serde_json::from_value(json!(null)).unwrap();
        assert!(value.is_missing());

        let value: AuthorRef<AuthorResponse> = serde_json::from_value(
            json!({"id": "2", "fullName": "Grace", "bio": "hi", "photoURL": null}),
        )
        .unwrap();
        assert_eq!(value.expanded().unwrap().full_name, "Grace");
    }

    #[test]
    fn test_homepage_keys() {
        let page = HomepageResponse {
            course_fe: vec![],
            course_be: vec![],
            blogs: vec![],
            videos: vec![],
        };
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({"courseFE": [], "courseBE": [], "blogs": [], "videos": []})
        );
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(Some(true), None);
        assert!(ready.is_ready());
        assert_eq!(ready.checks.database, "healthy");
        assert_eq!(ready.checks.redis, "disabled");

        let not_ready = ReadinessResponse::ready(Some(true), Some(false));
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.redis, "unhealthy");
    }
}
