//! Blog and comment-tree entity <-> model mapper

use blog_core::entities::{Blog, Comment, Reaction, Reply};
use blog_core::traits::{BlogLikes, BlogLink};
use blog_core::value_objects::Snowflake;
use sqlx::types::Json;

use crate::models::{
    BlogLikesModel, BlogLinkModel, BlogModel, CommentDocument, ReactionDocument, ReplyDocument,
};

impl From<BlogModel> for Blog {
    fn from(model: BlogModel) -> Self {
        Blog {
            id: Snowflake::new(model.id),
            slug: model.slug,
            title: model.title,
            title_display: model.title_display,
            content: model.content,
            image: model.image,
            reading_time: model.reading_time,
            author_id: Snowflake::new(model.author_id),
            tags: model.tags,
            is_posted: model.is_posted,
            is_verified: model.is_verified,
            is_popular: model.is_popular,
            schedule: model.schedule,
            likes: model.likes.into_iter().map(Snowflake::new).collect(),
            comments: comments_from_documents(model.comments.0),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<BlogLikesModel> for BlogLikes {
    fn from(model: BlogLikesModel) -> Self {
        BlogLikes {
            id: Snowflake::new(model.id),
            slug: model.slug,
            author_id: Snowflake::new(model.author_id),
            likes: model.likes.into_iter().map(Snowflake::new).collect(),
        }
    }
}

impl From<BlogLinkModel> for BlogLink {
    fn from(model: BlogLinkModel) -> Self {
        BlogLink {
            id: Snowflake::new(model.id),
            slug: model.slug,
            title_display: model.title_display,
        }
    }
}

pub fn comments_from_documents(docs: Vec<CommentDocument>) -> Vec<Comment> {
    docs.into_iter().map(Comment::from).collect()
}

impl From<CommentDocument> for Comment {
    fn from(doc: CommentDocument) -> Self {
        Comment {
            id: doc.id,
            author_id: doc.author_id,
            content: doc.content,
            is_code: doc.is_code,
            created_at: doc.created_at,
            replies: doc.replies.into_iter().map(Reply::from).collect(),
            reactions: doc.reactions.into_iter().map(Reaction::from).collect(),
        }
    }
}

impl From<&Comment> for CommentDocument {
    fn from(comment: &Comment) -> Self {
        CommentDocument {
            id: comment.id,
            author_id: comment.author_id,
            content: comment.content.clone(),
            is_code: comment.is_code,
            created_at: comment.created_at,
            replies: comment.replies.iter().map(ReplyDocument::from).collect(),
            reactions: comment.reactions.iter().map(ReactionDocument::from).collect(),
        }
    }
}

impl From<ReplyDocument> for Reply {
    fn from(doc: ReplyDocument) -> Self {
        Reply {
            id: doc.id,
            author_id: doc.author_id,
            content: doc.content,
            is_code: doc.is_code,
            created_at: doc.created_at,
        }
    }
}

impl From<&Reply> for ReplyDocument {
    fn from(reply: &Reply) -> Self {
        ReplyDocument {
            id: reply.id,
            author_id: reply.author_id,
            content: reply.content.clone(),
            is_code: reply.is_code,
            created_at: reply.created_at,
        }
    }
}

impl From<ReactionDocument> for Reaction {
    fn from(doc: ReactionDocument) -> Self {
        Reaction {
            emoji: doc.emoji,
            reactor_id: doc.reactor_id,
            created_at: doc.created_at,
        }
    }
}

impl From<&Reaction> for ReactionDocument {
    fn from(reaction: &Reaction) -> Self {
        ReactionDocument {
            emoji: reaction.emoji.clone(),
            reactor_id: reaction.reactor_id,
            created_at: reaction.created_at,
        }
    }
}

/// Bind values for inserting a blog
pub struct BlogInsert {
    pub id: i64,
    pub author_id: i64,
    pub likes: Vec<i64>,
    pub comments: Json<Vec<CommentDocument>>,
}

impl BlogInsert {
    pub fn new(blog: &Blog) -> Self {
        Self {
            id: blog.id.into_inner(),
            author_id: blog.author_id.into_inner(),
            likes: blog.likes.iter().map(|id| id.into_inner()).collect(),
            comments: Json(blog.comments.iter().map(CommentDocument::from).collect()),
        }
    }
}
