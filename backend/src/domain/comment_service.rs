//! Comment domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use super::ports::{CommentCommand, CommentRepository, CreateCommentRequest, GramRepository};
use super::service_guards::{
    gram_not_found, map_comment_repository_error, map_gram_repository_error, parse_gram_id,
    require_user,
};
use super::{Comment, CommentDraft, Error};

/// Comment service implementing [`CommentCommand`].
#[derive(Clone)]
pub struct CommentService<G, C> {
    grams: Arc<G>,
    comments: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<G, C> CommentService<G, C> {
    /// Build the service over the gram and comment repositories.
    pub fn new(grams: Arc<G>, comments: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            grams,
            comments,
            clock,
        }
    }
}

#[async_trait]
impl<G, C> CommentCommand for CommentService<G, C>
where
    G: GramRepository,
    C: CommentRepository,
{
    async fn create(&self, request: CreateCommentRequest) -> Result<Comment, Error> {
        let author = require_user(request.acting_user.as_ref())?.clone();
        let gram_id = parse_gram_id(&request.gram_id)?;
        self.grams
            .find_by_id(&gram_id)
            .await
            .map_err(map_gram_repository_error)?
            .ok_or_else(gram_not_found)?;

        let comment = Comment::new(CommentDraft {
            id: Uuid::new_v4(),
            gram_id,
            author,
            message: request.input.message,
            created_at: self.clock.utc(),
        });
        self.comments
            .insert(&comment)
            .await
            .map_err(map_comment_repository_error)?;

        info!(gram_id = %gram_id, comment_id = %comment.id(), "comment created");
        Ok(comment)
    }
}
