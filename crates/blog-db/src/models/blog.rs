//! Blog database model and its JSONB comment documents

use blog_core::Snowflake;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for blogs table
#[derive(Debug, Clone, FromRow)]
pub struct BlogModel {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub title_display: String,
    pub content: String,
    pub image: Option<String>,
    pub reading_time: i32,
    pub author_id: i64,
    pub tags: Vec<String>,
    pub is_posted: bool,
    pub is_verified: bool,
    pub is_popular: bool,
    pub schedule: Option<DateTime<Utc>>,
    pub likes: Vec<i64>,
    pub comments: Json<Vec<CommentDocument>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `RETURNING` projection of a like toggle
#[derive(Debug, Clone, FromRow)]
pub struct BlogLikesModel {
    pub id: i64,
    pub slug: String,
    pub author_id: i64,
    pub likes: Vec<i64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct BlogLinkModel {
    pub id: i64,
    pub slug: String,
    pub title_display: String,
}

/// One element of `blogs.comments`.
///
/// Ids are serialized as strings; the comment lookups match on `elem->>'id'`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDocument {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    #[serde(default)]
    pub is_code: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<ReplyDocument>,
    #[serde(default)]
    pub reactions: Vec<ReactionDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyDocument {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    #[serde(default)]
    pub is_code: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionDocument {
    pub emoji: String,
    pub reactor_id: Snowflake,
    pub created_at: DateTime<Utc>,
}
