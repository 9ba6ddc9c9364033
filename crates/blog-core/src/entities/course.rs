//! Course entity - read-only homepage collaborator

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Learning track a course is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseTrack {
    FrontEnd,
    BackEnd,
}

impl CourseTrack {
    /// Label stored on the course for this track
    pub const fn label(self) -> &'static str {
        match self {
            Self::FrontEnd => "Front-end",
            Self::BackEnd => "Back-end",
        }
    }
}

/// Track labels of a course
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseRole {
    pub front_end: Option<String>,
    pub back_end: Option<String>,
}

/// Course entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: Snowflake,
    pub slug: String,
    pub title: String,
    pub image: Option<String>,
    pub student_count: i32,
    pub role: CourseRole,
    pub created_at: DateTime<Utc>,
}

impl Course {
    /// Create a new Course without any track
    pub fn new(id: Snowflake, slug: String, title: String) -> Self {
        Self {
            id,
            slug,
            title,
            image: None,
            student_count: 0,
            role: CourseRole::default(),
            created_at: Utc::now(),
        }
    }

    /// Whether the course carries the label of `track`
    pub fn is_on_track(&self, track: CourseTrack) -> bool {
        let label = match track {
            CourseTrack::FrontEnd => self.role.front_end.as_deref(),
            CourseTrack::BackEnd => self.role.back_end.as_deref(),
        };
        label == Some(track.label())
    }
}
