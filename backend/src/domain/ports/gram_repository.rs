//! Port for gram persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Gram, GramMessage};

use super::define_port_error;

define_port_error! {
    /// Errors raised by gram repository adapters.
    pub enum GramRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "gram repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "gram repository query failed: {message}",
    }
}

/// Port for storing grams and reading them back with their comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GramRepository: Send + Sync {
    /// All grams, newest first, each with its comments.
    async fn list(&self) -> Result<Vec<Gram>, GramRepositoryError>;

    /// Find a gram by id, including its comments.
    async fn find_by_id(&self, gram_id: &Uuid) -> Result<Option<Gram>, GramRepositoryError>;

    /// Persist a new gram.
    async fn insert(&self, gram: &Gram) -> Result<(), GramRepositoryError>;

    /// Replace a gram's message. Returns `false` when the gram no longer exists.
    async fn update_message(
        &self,
        gram_id: &Uuid,
        message: &GramMessage,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, GramRepositoryError>;

    /// Delete a gram together with its comments in one atomic step.
    ///
    /// Returns `false` when the gram no longer exists.
    async fn delete(&self, gram_id: &Uuid) -> Result<bool, GramRepositoryError>;
}
