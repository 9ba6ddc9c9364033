//! Comment service
//!
//! Comments, replies and reactions live inside the blog record. Every
//! operation addresses a comment by its (blog, comment) pair and runs as one
//! repository update.

use blog_core::entities::{Comment, Reaction, Reply};
use blog_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::mappers::{comment_participants, AuthorDirectory};
use crate::dto::{
    CommentRequest, CommentResponse, CommentTarget, CommentsResponse, EditCommentRequest,
    ReactRequest, RepliesResponse, ReplyRequest, ReplyResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Prepend a comment to the blog
    #[instrument(skip(self, request), fields(blog_id = %request.blog_id))]
    pub async fn add_comment(
        &self,
        actor_id: Snowflake,
        request: CommentRequest,
    ) -> ServiceResult<CommentsResponse> {
        let comment = Comment::new(
            self.ctx.generate_id(),
            actor_id,
            request.content,
            request.is_code,
        );
        let comment_id = comment.id;

        let comments = self
            .ctx
            .blog_repo()
            .add_comment(request.blog_id, &comment)
            .await?
            .ok_or(DomainError::BlogNotFound(request.blog_id))?;

        info!(blog_id = %request.blog_id, comment_id = %comment_id, "Comment added");
        self.comments_response(request.blog_id, comments).await
    }

    /// Replies of one comment, newest first
    #[instrument(skip(self))]
    pub async fn get_replies(&self, target: CommentTarget) -> ServiceResult<RepliesResponse> {
        let comment = self.find_comment(target.blog_id, target.comment_id).await?;
        self.replies_response(target.blog_id, target.comment_id, comment.replies)
            .await
    }

    /// Prepend a reply to a comment
    #[instrument(skip(self, request), fields(blog_id = %request.blog_id, comment_id = %request.comment_id))]
    pub async fn add_reply(
        &self,
        actor_id: Snowflake,
        request: ReplyRequest,
    ) -> ServiceResult<RepliesResponse> {
        let reply = Reply::new(
            self.ctx.generate_id(),
            actor_id,
            request.content,
            request.is_code,
        );

        let replies = match self
            .ctx
            .blog_repo()
            .add_reply(request.blog_id, request.comment_id, &reply)
            .await?
        {
            Some(replies) => replies,
            None => return Err(self.missing(request.blog_id, request.comment_id).await),
        };

        info!(reply_id = %reply.id, "Reply added");
        self.replies_response(request.blog_id, request.comment_id, replies)
            .await
    }

    /// Append a reaction to a comment
    #[instrument(skip(self, request), fields(blog_id = %request.blog_id, comment_id = %request.comment_id))]
    pub async fn react(
        &self,
        actor_id: Snowflake,
        request: ReactRequest,
    ) -> ServiceResult<CommentsResponse> {
        let reaction = Reaction::new(request.emoji, actor_id);

        let comments = match self
            .ctx
            .blog_repo()
            .add_reaction(request.blog_id, request.comment_id, &reaction)
            .await?
        {
            Some(comments) => comments,
            None => return Err(self.missing(request.blog_id, request.comment_id).await),
        };

        info!(emoji = %reaction.emoji, "Reaction added");
        self.comments_response(request.blog_id, comments).await
    }

    /// Overwrite content and code flag. Only the comment author may edit.
    #[instrument(skip(self, request), fields(blog_id = %request.blog_id, comment_id = %request.comment_id))]
    pub async fn edit_comment(
        &self,
        actor_id: Snowflake,
        request: EditCommentRequest,
    ) -> ServiceResult<CommentsResponse> {
        let comment = self.find_comment(request.blog_id, request.comment_id).await?;
        if !comment.is_authored_by(actor_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        let comments = match self
            .ctx
            .blog_repo()
            .update_comment(
                request.blog_id,
                request.comment_id,
                &request.content,
                request.is_code,
            )
            .await?
        {
            Some(comments) => comments,
            None => return Err(self.missing(request.blog_id, request.comment_id).await),
        };

        info!("Comment edited");
        self.comments_response(request.blog_id, comments).await
    }

    /// Remove a comment with its replies. The comment author or the blog
    /// author may delete.
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        actor_id: Snowflake,
        target: CommentTarget,
    ) -> ServiceResult<CommentsResponse> {
        let blog = self
            .ctx
            .blog_repo()
            .find_by_id(target.blog_id)
            .await?
            .ok_or(DomainError::BlogNotFound(target.blog_id))?;
        let comment = blog.find_comment(target.comment_id).ok_or(DomainError::CommentNotFound {
            blog_id: target.blog_id,
            comment_id: target.comment_id,
        })?;

        if !comment.is_authored_by(actor_id) && !blog.is_authored_by(actor_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        let comments = match self
            .ctx
            .blog_repo()
            .remove_comment(target.blog_id, target.comment_id)
            .await?
        {
            Some(comments) => comments,
            None => return Err(self.missing(target.blog_id, target.comment_id).await),
        };

        info!(blog_id = %target.blog_id, comment_id = %target.comment_id, "Comment deleted");
        self.comments_response(target.blog_id, comments).await
    }

    async fn find_comment(&self, blog_id: Snowflake, comment_id: Snowflake) -> ServiceResult<Comment> {
        let blog = self
            .ctx
            .blog_repo()
            .find_by_id(blog_id)
            .await?
            .ok_or(DomainError::BlogNotFound(blog_id))?;

        blog.comments
            .into_iter()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| DomainError::CommentNotFound { blog_id, comment_id }.into())
    }

    /// Which half of the (blog, comment) pair matched nothing
    async fn missing(&self, blog_id: Snowflake, comment_id: Snowflake) -> ServiceError {
        match self.ctx.blog_repo().find_by_id(blog_id).await {
            Ok(Some(_)) => DomainError::CommentNotFound { blog_id, comment_id }.into(),
            Ok(None) => DomainError::BlogNotFound(blog_id).into(),
            Err(e) => e.into(),
        }
    }

    async fn comments_response(
        &self,
        blog_id: Snowflake,
        comments: Vec<Comment>,
    ) -> ServiceResult<CommentsResponse> {
        let authors =
            AuthorDirectory::load(self.ctx.user_repo(), comment_participants(&comments)).await?;
        Ok(CommentsResponse {
            id: blog_id.to_string(),
            comments: CommentResponse::expanded_all(comments, &authors),
        })
    }

    async fn replies_response(
        &self,
        blog_id: Snowflake,
        comment_id: Snowflake,
        replies: Vec<Reply>,
    ) -> ServiceResult<RepliesResponse> {
        let authors = AuthorDirectory::load(
            self.ctx.user_repo(),
            replies.iter().map(|r| r.author_id).collect(),
        )
        .await?;
        Ok(RepliesResponse {
            blog_id: blog_id.to_string(),
            comment_id: comment_id.to_string(),
            replies: ReplyResponse::expanded_all(replies, &authors),
        })
    }
}
