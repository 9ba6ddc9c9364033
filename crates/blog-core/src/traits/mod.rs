//! Repository traits

mod repositories;

pub use repositories::{
    BlogLikes, BlogLink, BlogRepository, CourseRepository, PendingSchedule, RepoResult,
    UserRepository, VideoRepository,
};
