//! Checks shared by the gram and comment services.
//!
//! Each guard yields the domain [`Error`] whose code the inbound adapters
//! translate into a status or redirect.

use uuid::Uuid;

use super::ports::{CommentRepositoryError, GramRepositoryError, PictureStoreError};
use super::{Error, UserId};

/// Require a signed-in user.
pub(crate) fn require_user(acting_user: Option<&UserId>) -> Result<&UserId, Error> {
    acting_user.ok_or_else(|| Error::unauthorized("you need to sign in before continuing"))
}

/// Error reported for any gram id that cannot be resolved.
pub(crate) fn gram_not_found() -> Error {
    Error::not_found("gram not found")
}

/// Parse a route id. Anything that is not a UUID cannot name a gram.
pub(crate) fn parse_gram_id(raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw.trim()).map_err(|_| gram_not_found())
}

pub(crate) fn map_gram_repository_error(error: GramRepositoryError) -> Error {
    match error {
        GramRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("gram repository unavailable: {message}"))
        }
        GramRepositoryError::Query { message } => {
            Error::internal(format!("gram repository error: {message}"))
        }
    }
}

pub(crate) fn map_comment_repository_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("comment repository unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment repository error: {message}"))
        }
        CommentRepositoryError::MissingGram { .. } => gram_not_found(),
    }
}

pub(crate) fn map_picture_store_error(error: PictureStoreError) -> Error {
    match error {
        PictureStoreError::NotFound { .. } => Error::not_found("picture not found"),
        PictureStoreError::Io { message } => {
            Error::service_unavailable(format!("picture storage unavailable: {message}"))
        }
    }
}
