//! Blog entity - the aggregate root owning its likes and comment tree

use chrono::{DateTime, Utc};

use super::comment::Comment;
use crate::value_objects::Snowflake;

/// Where a blog sits on its way to public listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Not marked as posted by its author
    Draft,
    /// Waiting for the deferred schedule to elapse
    Scheduled,
    /// Posted and unscheduled, but not yet verified
    PendingVerification,
    /// Listed publicly
    Public,
}

/// Blog aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: Snowflake,
    pub slug: String,
    pub title: String,
    pub title_display: String,
    pub content: String,
    pub image: Option<String>,
    pub reading_time: i32,
    pub author_id: Snowflake,
    pub tags: Vec<String>,
    pub is_posted: bool,
    pub is_verified: bool,
    pub is_popular: bool,
    pub schedule: Option<DateTime<Utc>>,
    /// Most recent liker first
    pub likes: Vec<Snowflake>,
    /// Most recent comment first
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Create a new posted, unverified blog with no schedule
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        slug: String,
        title: String,
        content: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            slug,
            title_display: title.clone(),
            title,
            content,
            image: None,
            reading_time: 0,
            author_id,
            tags: Vec::new(),
            is_posted: true,
            is_verified: false,
            is_popular: false,
            schedule: None,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Current visibility state
    pub fn visibility(&self) -> Visibility {
        if !self.is_posted {
            Visibility::Draft
        } else if self.schedule.is_some() {
            Visibility::Scheduled
        } else if !self.is_verified {
            Visibility::PendingVerification
        } else {
            Visibility::Public
        }
    }

    /// Eligible for public listings (list, tag, homepage)
    #[inline]
    pub fn is_public(&self) -> bool {
        self.visibility() == Visibility::Public
    }

    /// Eligible for direct reads by slug and for the popular sidebar.
    /// Verification is not required here.
    #[inline]
    pub fn is_readable(&self) -> bool {
        self.is_posted && self.schedule.is_none()
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    #[inline]
    pub fn is_liked_by(&self, user_id: Snowflake) -> bool {
        self.likes.contains(&user_id)
    }

    /// Invert the user's membership in the likers list.
    ///
    /// Returns `true` when the user likes the blog afterwards.
    pub fn toggle_like(&mut self, user_id: Snowflake) -> bool {
        if self.is_liked_by(user_id) {
            self.likes.retain(|id| *id != user_id);
            false
        } else {
            self.likes.insert(0, user_id);
            true
        }
    }

    /// Overwrite title and content, leaving every other field untouched
    pub fn edit(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
        self.updated_at = Utc::now();
    }

    /// Prepend a comment
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    pub fn find_comment(&self, comment_id: Snowflake) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    pub fn find_comment_mut(&mut self, comment_id: Snowflake) -> Option<&mut Comment> {
        self.comments.iter_mut().find(|c| c.id == comment_id)
    }

    /// Remove a comment, returning whether it existed
    pub fn remove_comment(&mut self, comment_id: Snowflake) -> bool {
        let before = self.comments.len();
        self.comments.retain(|c| c.id != comment_id);
        self.comments.len() != before
    }

    /// Every user referenced by the comment tree (authors, repliers, reactors)
    pub fn comment_participants(&self) -> Vec<Snowflake> {
        let mut ids: Vec<Snowflake> = self
            .comments
            .iter()
            .flat_map(Comment::participants)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
