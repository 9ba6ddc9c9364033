//! User entity - the author/commenter profile referenced by blogs

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub full_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, full_name: String, email: String) -> Self {
        Self {
            id,
            full_name,
            email,
            bio: None,
            photo_url: None,
            created_at: Utc::now(),
        }
    }
}
