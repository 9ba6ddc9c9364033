//! Route definitions
//!
//! Blog, comment and homepage routes, plus health probes kept in a separate
//! router so they bypass rate limiting.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{blogs, comments, health, home};
use crate::state::AppState;

/// Create the main API router (excluding health)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::get_homepage))
        .merge(blog_routes())
        .merge(comment_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Blog routes
///
/// Static segments take priority over `/blog/:slug`. The edit route is
/// addressed by slug for GET and by blog id for PUT.
fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/new-post", post(blogs::create_blog))
        .route("/blog", get(blogs::list_blogs))
        .route("/blog/like", patch(blogs::toggle_like))
        .route("/blog/tag/:tag", get(blogs::list_blogs_by_tag))
        .route(
            "/blog/edit-blog/:slug",
            get(blogs::get_blog_for_edit).put(blogs::edit_blog),
        )
        .route("/blog/delete-blog/:blog_id", delete(blogs::delete_blog))
        .route("/blog/:slug", get(blogs::get_blog))
        .route("/blog/:slug/:author_id", get(blogs::get_related_blogs))
}

/// Comment routes. Bodies carry `blogId` and `commentId`.
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comment", put(comments::add_comment))
        .route("/get-reply", post(comments::get_replies))
        .route("/reply", put(comments::add_reply))
        .route("/comment/react", put(comments::react))
        .route("/comment/edit", put(comments::edit_comment))
        .route("/comment/delete", put(comments::delete_comment))
}
