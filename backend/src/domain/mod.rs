//! Domain primitives, services and ports.
//!
//! Purpose: hold the gram and comment rules independent of HTTP and storage.
//! Services implement the driving ports in [`ports`] and depend only on the
//! driven ports defined there.
//!
//! Public surface:
//! - [`Gram`], [`Comment`] and their value types.
//! - [`GramService`] and [`CommentService`].
//! - [`Error`] and [`ErrorCode`], the error payload shared by every layer.

mod access_policy;
pub mod auth;
mod comment;
mod comment_service;
pub mod error;
mod gram;
mod gram_service;
pub mod ports;
mod service_guards;
mod trace_id;
pub mod user;

pub use self::access_policy::GramAccessPolicy;
pub use self::auth::{LoginCredentials, LoginValidationError, password_digest};
pub use self::comment::{Comment, CommentDraft};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::gram::{
    DEFAULT_MAX_PICTURE_BYTES, Gram, GramDraft, GramMessage, GramValidationError, PictureFormat,
    PictureKey, PictureKeyError, PictureUpload,
};
pub use self::gram_service::GramService;
pub(crate) use self::service_guards::map_picture_store_error;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};

