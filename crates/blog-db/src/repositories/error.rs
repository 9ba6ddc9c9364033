//! Error handling utilities for repositories

use blog_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => on_unique(),
        _ => map_db_error(e),
    }
}
