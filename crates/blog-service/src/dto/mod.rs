//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs, expanding user references

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CommentRequest, CommentTarget, CreateBlogRequest, EditBlogRequest, EditCommentRequest,
    LikeRequest, ReactRequest, ReplyRequest,
};

pub use responses::{
    AuthorRef, AuthorResponse, BlogResponse, BlogSlugResponse, CommentResponse,
    CommenterResponse, CommentsResponse, CourseSummaryResponse, CreateBlogResponse,
    HealthChecks, HealthResponse, HomepageBlogResponse, HomepageResponse, LikesResponse,
    ReactionResponse, ReadinessResponse, RelatedBlogResponse, RepliesResponse, ReplyResponse,
    SuccessResponse, VideoResponse,
};

pub use mappers::AuthorDirectory;
