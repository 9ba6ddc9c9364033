//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in blog-core.

mod blog;
mod course;
mod error;
mod user;
mod video;

pub use blog::PgBlogRepository;
pub use course::PgCourseRepository;
pub use user::PgUserRepository;
pub use video::PgVideoRepository;
