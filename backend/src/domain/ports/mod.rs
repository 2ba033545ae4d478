//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PictureStore`]) return typed errors built
//! with `define_port_error!`; driving ports (`*Command`, `*Query`,
//! [`LoginService`]) speak the domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod comment_command;
mod comment_repository;
mod gram_command;
mod gram_query;
mod gram_repository;
mod login_service;
mod picture_store;

pub use comment_command::{CommentCommand, CreateCommentInput, CreateCommentRequest};
#[cfg(test)]
pub use comment_command::MockCommentCommand;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use gram_command::{
    CreateGramInput, CreateGramRequest, DestroyGramRequest, GramCommand, UpdateGramInput,
    UpdateGramRequest,
};
#[cfg(test)]
pub use gram_command::MockGramCommand;
pub use gram_query::{EditGramFormRequest, GramQuery, NewGramFormRequest, ShowGramRequest};
#[cfg(test)]
pub use gram_query::MockGramQuery;
pub use gram_repository::{GramRepository, GramRepositoryError};
#[cfg(test)]
pub use gram_repository::MockGramRepository;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use picture_store::{PictureStore, PictureStoreError};
#[cfg(test)]
pub use picture_store::MockPictureStore;
