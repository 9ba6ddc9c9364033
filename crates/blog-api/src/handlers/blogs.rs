//! Blog handlers
//!
//! Endpoints for publishing, reading, editing, deleting and liking blogs.

use axum::{
    extract::{Path, State},
    Json,
};
use blog_service::{
    dto::{
        BlogResponse, BlogSlugResponse, CreateBlogRequest, CreateBlogResponse, EditBlogRequest,
        LikeRequest, LikesResponse, RelatedBlogResponse, SuccessResponse,
    },
    BlogService,
};

use crate::extractors::{parse_id, AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, FailureMessage, INTERNAL_SERVER_ERROR};
use crate::state::AppState;

const GET_BLOG_FAILED: &str = "Get blog failed!";
const EDIT_BLOG_FAILED: &str = "Edit blog failed!";

/// Publish a blog
///
/// POST /new-post
pub async fn create_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBlogRequest>,
) -> ApiResult<Json<CreateBlogResponse>> {
    let blog = BlogService::new(state.service_context())
        .create(auth.user_id, request)
        .await
        .or_fail("Post blog failed!")?;
    Ok(Json(CreateBlogResponse::new(blog)))
}

/// Published blogs, newest first
///
/// GET /blog
pub async fn list_blogs(State(state): State<AppState>) -> ApiResult<Json<Vec<BlogResponse>>> {
    let blogs = BlogService::new(state.service_context())
        .list_published()
        .await
        .or_fail(GET_BLOG_FAILED)?;
    Ok(Json(blogs))
}

/// Published blogs carrying a tag
///
/// GET /blog/tag/{tag}
pub async fn list_blogs_by_tag(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> ApiResult<Json<Vec<BlogResponse>>> {
    let blogs = BlogService::new(state.service_context())
        .list_by_tag(&tag)
        .await
        .or_fail(INTERNAL_SERVER_ERROR)?;
    Ok(Json(blogs))
}

/// Blog by slug with the popular sidebar
///
/// GET /blog/{slug}
pub async fn get_blog(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<BlogSlugResponse>> {
    let response = BlogService::new(state.service_context())
        .get_by_slug(&slug)
        .await
        .or_fail(INTERNAL_SERVER_ERROR)?;
    Ok(Json(response))
}

/// Stored blog for its author to edit
///
/// GET /blog/edit-blog/{slug}
pub async fn get_blog_for_edit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<BlogResponse>> {
    let blog = BlogService::new(state.service_context())
        .get_for_edit(auth.user_id, &slug)
        .await
        .or_fail(INTERNAL_SERVER_ERROR)?;
    Ok(Json(blog))
}

/// Overwrite title and content
///
/// PUT /blog/edit-blog/{blog_id}
pub async fn edit_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(blog_id): IdPath,
    ValidatedJson(request): ValidatedJson<EditBlogRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    BlogService::new(state.service_context())
        .edit(auth.user_id, blog_id, request)
        .await
        .or_fail(EDIT_BLOG_FAILED)?;
    Ok(Json(SuccessResponse::new("Edit blog successfully!")))
}

/// Delete a blog and return the author's remaining blogs
///
/// DELETE /blog/delete-blog/{blog_id}
pub async fn delete_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(blog_id): IdPath,
) -> ApiResult<Json<Vec<BlogResponse>>> {
    let remaining = BlogService::new(state.service_context())
        .delete(auth.user_id, blog_id)
        .await
        .or_fail(INTERNAL_SERVER_ERROR)?;
    Ok(Json(remaining))
}

/// Other published blogs by the same author
///
/// GET /blog/{blog_id}/{author_id}
pub async fn get_related_blogs(
    State(state): State<AppState>,
    Path((blog_id, author_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<RelatedBlogResponse>>> {
    let blog_id = parse_id(&blog_id, "blogId")?;
    let author_id = parse_id(&author_id, "authorId")?;

    let related = BlogService::new(state.service_context())
        .related(blog_id, author_id)
        .await
        .or_fail(GET_BLOG_FAILED)?;
    Ok(Json(related))
}

/// Like a blog, or take the like back
///
/// PATCH /blog/like
pub async fn toggle_like(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<LikeRequest>,
) -> ApiResult<Json<LikesResponse>> {
    let likes = BlogService::new(state.service_context())
        .toggle_like(auth.user_id, request.blog_id)
        .await
        .or_fail("Like failed!")?;
    Ok(Json(likes))
}
