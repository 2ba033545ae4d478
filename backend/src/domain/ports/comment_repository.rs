//! Port for comment persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Comment;

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "comment repository query failed: {message}",
        /// The parent gram disappeared before the comment was written.
        MissingGram { gram_id: Uuid } =>
            "gram {gram_id} does not exist",
    }
}

/// Port for writing comments.
///
/// Grams come back from [`super::GramRepository`] with their comments attached,
/// so reads go through that port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment.
    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError>;
}
