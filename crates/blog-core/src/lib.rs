//! # blog-core
//!
//! Domain layer containing the Blog aggregate, its embedded comment tree,
//! the homepage collaborators, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Blog, Comment, Course, CourseRole, CourseTrack, Reaction, Reply, User, Video, Visibility,
};
pub use error::DomainError;
pub use traits::{
    BlogLikes, BlogLink, BlogRepository, CourseRepository, PendingSchedule, RepoResult,
    UserRepository, VideoRepository,
};
pub use value_objects::{Slug, SlugError, Snowflake, SnowflakeGenerator, SnowflakeParseError};
