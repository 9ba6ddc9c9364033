//! Domain entities - core business objects

mod blog;
mod comment;
mod course;
mod user;
mod video;

pub use blog::{Blog, Visibility};
pub use comment::{Comment, Reaction, Reply};
pub use course::{Course, CourseRole, CourseTrack};
pub use user::User;
pub use video::Video;
