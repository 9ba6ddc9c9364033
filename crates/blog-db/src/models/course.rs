//! Course database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct CourseModel {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub image: Option<String>,
    pub student_count: i32,
    pub role_fe: Option<String>,
    pub role_be: Option<String>,
    pub created_at: DateTime<Utc>,
}
