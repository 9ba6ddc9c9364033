//! Database models
//!
//! Row structs derive `FromRow`; the embedded comment tree is modelled as
//! serde documents stored in the `blogs.comments` JSONB column.

mod blog;
mod course;
mod user;
mod video;

pub use blog::{
    BlogLikesModel, BlogLinkModel, BlogModel, CommentDocument, ReactionDocument, ReplyDocument,
};
pub use course::CourseModel;
pub use user::UserModel;
pub use video::VideoModel;
