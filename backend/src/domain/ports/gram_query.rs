//! Driving port for reading grams and guarding the gram forms.

use async_trait::async_trait;

use crate::domain::{Error, Gram, UserId};

/// Request to show a single gram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowGramRequest {
    /// Raw identifier from the route; anything that is not a UUID is not found.
    pub gram_id: String,
}

/// Request to open the new-gram form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGramFormRequest {
    pub acting_user: Option<UserId>,
}

/// Request to open the edit form for a gram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditGramFormRequest {
    pub acting_user: Option<UserId>,
    pub gram_id: String,
}

/// Driving port for gram reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GramQuery: Send + Sync {
    /// Every gram, newest first. Needs no session.
    async fn list(&self) -> Result<Vec<Gram>, Error>;

    /// One gram with its comments, or `not_found`.
    async fn show(&self, request: ShowGramRequest) -> Result<Gram, Error>;

    /// Succeeds only for a signed-in user; otherwise `unauthorized`.
    async fn new_form(&self, request: NewGramFormRequest) -> Result<(), Error>;

    /// The gram to prefill the edit form with.
    ///
    /// Checks existence, then authentication, then ownership.
    async fn edit_form(&self, request: EditGramFormRequest) -> Result<Gram, Error>;
}
