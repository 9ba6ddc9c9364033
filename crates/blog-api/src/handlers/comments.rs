//! Comment handlers
//!
//! Comments, replies and reactions on a blog. Every body names the blog,
//! and the comment where one is targeted.

use axum::{extract::State, Json};
use blog_service::{
    dto::{
        CommentRequest, CommentTarget, CommentsResponse, EditCommentRequest, ReactRequest,
        RepliesResponse, ReplyRequest,
    },
    CommentService,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, FailureMessage, INTERNAL_SERVER_ERROR};
use crate::state::AppState;

/// Add a comment
///
/// PUT /comment
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CommentRequest>,
) -> ApiResult<Json<CommentsResponse>> {
    let comments = CommentService::new(state.service_context())
        .add_comment(auth.user_id, request)
        .await
        .or_fail("Comment failed!")?;
    Ok(Json(comments))
}

/// Replies of a comment
///
/// POST /get-reply
pub async fn get_replies(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(target): ValidatedJson<CommentTarget>,
) -> ApiResult<Json<RepliesResponse>> {
    let replies = CommentService::new(state.service_context())
        .get_replies(target)
        .await
        .or_fail(INTERNAL_SERVER_ERROR)?;
    Ok(Json(replies))
}

/// Reply to a comment
///
/// PUT /reply
pub async fn add_reply(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ReplyRequest>,
) -> ApiResult<Json<RepliesResponse>> {
    let replies = CommentService::new(state.service_context())
        .add_reply(auth.user_id, request)
        .await
        .or_fail("Reply error")?;
    Ok(Json(replies))
}

/// React to a comment
///
/// PUT /comment/react
pub async fn react(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ReactRequest>,
) -> ApiResult<Json<CommentsResponse>> {
    let comments = CommentService::new(state.service_context())
        .react(auth.user_id, request)
        .await
        .or_fail("React failed!")?;
    Ok(Json(comments))
}

/// Edit own comment
///
/// PUT /comment/edit
pub async fn edit_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<EditCommentRequest>,
) -> ApiResult<Json<CommentsResponse>> {
    let comments = CommentService::new(state.service_context())
        .edit_comment(auth.user_id, request)
        .await
        .or_fail("Edit comment failed!")?;
    Ok(Json(comments))
}

/// Delete a comment with its replies
///
/// PUT /comment/delete
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(target): ValidatedJson<CommentTarget>,
) -> ApiResult<Json<CommentsResponse>> {
    let comments = CommentService::new(state.service_context())
        .delete_comment(auth.user_id, target)
        .await
        .or_fail("Delete comment failed!")?;
    Ok(Json(comments))
}
