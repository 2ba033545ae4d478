//! Driving port for gram mutations.
//!
//! Every request names the acting user explicitly; services never read a
//! session or any other ambient state.

use async_trait::async_trait;

use crate::domain::{Error, Gram, PictureUpload, UserId};

/// Fields accepted when posting a gram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGramInput {
    pub message: String,
    pub picture: Option<PictureUpload>,
}

/// Fields accepted when editing a gram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGramInput {
    pub message: String,
}

/// Request to create a gram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGramRequest {
    pub acting_user: Option<UserId>,
    pub input: CreateGramInput,
}

/// Request to change a gram's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGramRequest {
    pub acting_user: Option<UserId>,
    pub gram_id: String,
    pub input: UpdateGramInput,
}

/// Request to delete a gram and its comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestroyGramRequest {
    pub acting_user: Option<UserId>,
    pub gram_id: String,
}

/// Driving port for gram writes.
///
/// Failures are reported through [`Error`] codes: `unauthorized` when no user
/// is acting, `not_found` for unknown ids, `forbidden` for non-owners and
/// `validation_failed` for rejected input. A failed call never changes stored
/// state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GramCommand: Send + Sync {
    /// Validate the input, store the picture and persist a gram owned by the
    /// acting user.
    async fn create(&self, request: CreateGramRequest) -> Result<Gram, Error>;

    /// Replace the message of an owned gram.
    async fn update(&self, request: UpdateGramRequest) -> Result<Gram, Error>;

    /// Delete an owned gram, its comments and its picture.
    async fn destroy(&self, request: DestroyGramRequest) -> Result<(), Error>;
}
