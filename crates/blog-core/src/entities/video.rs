//! Video entity - read-only homepage collaborator

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: Snowflake,
    pub slug: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub is_popular: bool,
    pub created_at: DateTime<Utc>,
}

impl Video {
    pub fn new(id: Snowflake, slug: String, title: String) -> Self {
        Self {
            id,
            slug,
            title,
            thumbnail: None,
            is_popular: false,
            created_at: Utc::now(),
        }
    }
}
