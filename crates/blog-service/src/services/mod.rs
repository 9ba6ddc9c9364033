//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of one
//! request and runs one use case against the repositories.

pub mod blog;
pub mod comment;
pub mod context;
pub mod error;
pub mod homepage;
pub mod scheduler;

pub use blog::BlogService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use homepage::HomepageService;
pub use scheduler::PublishScheduler;

#[cfg(test)]
pub(crate) mod test_support;
