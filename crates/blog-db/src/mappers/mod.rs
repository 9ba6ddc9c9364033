//! Entity <-> model mappers

mod blog;
mod course;
mod user;
mod video;

pub use blog::{comments_from_documents, BlogInsert};
