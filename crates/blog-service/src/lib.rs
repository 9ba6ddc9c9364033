//! # blog-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    BlogService, CommentService, HomepageService, PublishScheduler, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
