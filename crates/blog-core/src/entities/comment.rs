//! Comment tree embedded in a blog: comments, their replies and reactions

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub is_code: bool,
    pub created_at: DateTime<Utc>,
    /// Most recent reply first
    pub replies: Vec<Reply>,
    /// In the order they were added
    pub reactions: Vec<Reaction>,
}

impl Comment {
    /// Create a new Comment
    pub fn new(id: Snowflake, author_id: Snowflake, content: String, is_code: bool) -> Self {
        Self {
            id,
            author_id,
            content,
            is_code,
            created_at: Utc::now(),
            replies: Vec::new(),
            reactions: Vec::new(),
        }
    }

    /// Prepend a reply
    pub fn add_reply(&mut self, reply: Reply) {
        self.replies.insert(0, reply);
    }

    /// Append a reaction
    pub fn add_reaction(&mut self, reaction: Reaction) {
        self.reactions.push(reaction);
    }

    /// Overwrite content and code flag
    pub fn edit(&mut self, content: String, is_code: bool) {
        self.content = content;
        self.is_code = is_code;
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Users referenced by this comment, its replies and reactions
    pub fn participants(&self) -> impl Iterator<Item = Snowflake> + '_ {
        std::iter::once(self.author_id)
            .chain(self.replies.iter().map(|r| r.author_id))
            .chain(self.reactions.iter().map(|r| r.reactor_id))
    }
}

/// Reply to a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub is_code: bool,
    pub created_at: DateTime<Utc>,
}

impl Reply {
    /// Create a new Reply
    pub fn new(id: Snowflake, author_id: Snowflake, content: String, is_code: bool) -> Self {
        Self {
            id,
            author_id,
            content,
            is_code,
            created_at: Utc::now(),
        }
    }
}

/// Emoji reaction on a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub emoji: String,
    pub reactor_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(emoji: String, reactor_id: Snowflake) -> Self {
        Self {
            emoji,
            reactor_id,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_emoji(&self, emoji: &str) -> bool {
        self.emoji == emoji
    }
}
