//! Video database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct VideoModel {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub is_popular: bool,
    pub created_at: DateTime<Utc>,
}
