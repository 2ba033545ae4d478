//! Request-shape validation shared by the HTTP handlers.
//!
//! These errors cover bodies that cannot be read at all (unknown or repeated
//! fields, broken encodings). They map to `invalid_request`. Rejections of
//! well-formed input come from the domain as `validation_failed`.

use actix_web::{HttpRequest, error::JsonPayloadError, web};
use serde_json::json;

use crate::domain::Error;

/// Machine-readable reasons for a malformed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    UnknownField,
    DuplicateField,
    InvalidEncoding,
    TooLong,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UnknownField => "unknown_field",
            ErrorCode::DuplicateField => "duplicate_field",
            ErrorCode::InvalidEncoding => "invalid_encoding",
            ErrorCode::TooLong => "too_long",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

fn field_error(code: ErrorCode, field: &str, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn unknown_field_error(field: &str) -> Error {
    field_error(
        ErrorCode::UnknownField,
        field,
        format!("unknown field `{field}`"),
    )
}

pub(crate) fn duplicate_field_error(field: &str) -> Error {
    field_error(
        ErrorCode::DuplicateField,
        field,
        format!("field `{field}` was sent more than once"),
    )
}

pub(crate) fn invalid_encoding_error(field: &str) -> Error {
    field_error(
        ErrorCode::InvalidEncoding,
        field,
        format!("field `{field}` is not valid UTF-8"),
    )
}

pub(crate) fn too_long_error(field: &str, max_bytes: usize) -> Error {
    field_error(
        ErrorCode::TooLong,
        field,
        format!("field `{field}` is longer than {max_bytes} bytes"),
    )
}

pub(crate) fn malformed_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("request body could not be read: {reason}"))
        .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }))
}

/// Unwrap a JSON body the handler extracted as a `Result`.
///
/// Handlers take the body this way so they can check the session before the
/// body is judged. Errors built by [`json_config`] come back unchanged.
pub(crate) fn json_body<T>(payload: Result<web::Json<T>, actix_web::Error>) -> Result<T, Error> {
    payload.map(web::Json::into_inner).map_err(|err| {
        err.as_error::<Error>()
            .cloned()
            .unwrap_or_else(|| malformed_body_error(&err))
    })
}

/// JSON extractor configuration that reports body errors as `invalid_request`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use grammable::inbound::http::validation::json_config;
///
/// let app = App::new().app_data(json_config());
/// ```
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        malformed_body_error(&err).into()
    })
}
