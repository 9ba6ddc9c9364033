//! # blog-db
//!
//! Persistence for the blog subsystem.
//!
//! A blog is stored as one `blogs` row whose `comments` column holds the whole
//! comment tree (comments, replies, reactions) as a JSONB document, so every
//! nested mutation is a single atomic `UPDATE`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blog_db::{create_pool, run_migrations, PgBlogRepository};
//!
//! let pool = create_pool(&config.database).await?;
//! run_migrations(&pool).await?;
//! let blogs = PgBlogRepository::new(pool);
//! ```
//!
//! The [`memory`] module implements the same repository traits over
//! in-process maps for tests and database-less runs.

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{
    MemoryBlogRepository, MemoryCourseRepository, MemoryUserRepository, MemoryVideoRepository,
};
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{
    PgBlogRepository, PgCourseRepository, PgUserRepository, PgVideoRepository,
};
