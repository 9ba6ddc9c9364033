//! In-memory repositories for tests and ephemeral runs.
//!
//! Each store keeps its records in a `HashMap` behind a `parking_lot::RwLock`
//! and mirrors the filters of the PostgreSQL repositories. A mutation holds
//! the write lock for its whole read-modify-write, which gives the same
//! per-blog atomicity as a single `UPDATE`. Data is lost when the store is
//! dropped.

mod blog;
mod catalog;
mod user;

pub use blog::MemoryBlogRepository;
pub use catalog::{MemoryCourseRepository, MemoryVideoRepository};
pub use user::MemoryUserRepository;
