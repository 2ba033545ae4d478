//! Driving port for posting comments.

use async_trait::async_trait;

use crate::domain::{Comment, Error, UserId};

/// Fields accepted when commenting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentInput {
    pub message: String,
}

/// Request to comment on a gram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentRequest {
    pub acting_user: Option<UserId>,
    pub gram_id: String,
    pub input: CreateCommentInput,
}

/// Driving port for comment writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    /// Attach a comment authored by the acting user to an existing gram.
    ///
    /// Authentication is checked before the gram lookup; any signed-in user
    /// may comment on any gram.
    async fn create(&self, request: CreateCommentRequest) -> Result<Comment, Error>;
}
