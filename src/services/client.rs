use crate::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A post as the platform reported it at fetch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub locked: bool,
}

/// A comment as the platform reported it at fetch time.
/// Replies are not embedded; fetch them with [`ModerationClient::comment_replies`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub removed: bool,
    pub distinguished: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Remote content-moderation API. Every call is a round trip to the platform,
/// which owns all posts, comments and users.
#[async_trait]
pub trait ModerationClient: Send + Sync {
    async fn get_post_by_id(&self, id: &PostId) -> Result<Option<Post>, Error>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, Error>;

    async fn lock_post(&self, id: &PostId) -> Result<(), Error>;

    async fn unlock_post(&self, id: &PostId) -> Result<(), Error>;

    /// Top-level comments of a post, in the platform's order.
    async fn post_comments(&self, id: &PostId) -> Result<Vec<Comment>, Error>;

    /// Direct replies to a comment, in the platform's order.
    async fn comment_replies(&self, id: &CommentId) -> Result<Vec<Comment>, Error>;

    async fn remove_comment(&self, id: &CommentId) -> Result<(), Error>;
}
