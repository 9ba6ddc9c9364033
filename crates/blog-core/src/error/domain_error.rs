//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Blog not found: {0}")]
    BlogNotFound(Snowflake),

    #[error("Blog not found: {0}")]
    BlogSlugNotFound(String),

    #[error("Comment {comment_id} not found on blog {blog_id}")]
    CommentNotFound {
        blog_id: Snowflake,
        comment_id: Snowflake,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not blog author")]
    NotBlogAuthor,

    #[error("Not comment author")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Slug already in use: {0}")]
    SlugAlreadyExists(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::BlogNotFound(_) | Self::BlogSlugNotFound(_) => "UNKNOWN_BLOG",
            Self::CommentNotFound { .. } => "UNKNOWN_COMMENT",

            // Validation
            Self::InvalidSlug(_) => "INVALID_SLUG",

            // Authorization
            Self::NotBlogAuthor => "NOT_BLOG_AUTHOR",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Conflict
            Self::SlugAlreadyExists(_) => "SLUG_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BlogNotFound(_) | Self::BlogSlugNotFound(_) | Self::CommentNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidSlug(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotBlogAuthor | Self::NotCommentAuthor)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SlugAlreadyExists(_))
    }
}
