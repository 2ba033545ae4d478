//! `multipart/form-data` reader for the new-gram form.
//!
//! Accepts exactly two parts, `message` and `picture`. Picture bytes are
//! buffered up to one byte past the limit and the rest of the part is
//! drained, so oversized uploads are still rejected by the domain without
//! holding the whole file in memory. Messages are read the same way but an
//! over-long message is refused here, never stored cut short.

use actix_multipart::{Field, Multipart, MultipartError};
use futures_util::StreamExt;

use crate::domain::Error;
use crate::domain::PictureUpload;
use crate::domain::ports::CreateGramInput;

use super::validation::{
    duplicate_field_error, invalid_encoding_error, malformed_body_error, too_long_error,
    unknown_field_error,
};

const MESSAGE_FIELD: &str = "message";
const PICTURE_FIELD: &str = "picture";
/// Longest accepted message, in bytes.
pub(crate) const MAX_MESSAGE_BYTES: usize = 64 * 1024;
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Read the part body, keeping at most `keep` bytes.
async fn read_capped(field: &mut Field, keep: usize) -> Result<Vec<u8>, Error> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed_body_error)?;
        let room = keep.saturating_sub(buffer.len());
        buffer.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }
    Ok(buffer)
}

async fn read_picture(field: &mut Field, max_bytes: usize) -> Result<Option<PictureUpload>, Error> {
    let file_name = field
        .content_disposition()
        .and_then(|disposition| disposition.get_filename())
        .filter(|name| !name.is_empty())
        .map(str::to_owned);
    let content_type = field
        .content_type()
        .map_or(FALLBACK_CONTENT_TYPE, |mime| mime.essence_str())
        .to_owned();
    let bytes = read_capped(field, max_bytes.saturating_add(1)).await?;

    // Browsers send an empty, unnamed part when no file was chosen.
    if bytes.is_empty() && file_name.is_none() {
        return Ok(None);
    }
    Ok(Some(PictureUpload {
        file_name,
        content_type,
        bytes,
    }))
}

/// Collect the new-gram form into a [`CreateGramInput`].
///
/// Missing parts are left for the domain to reject; unknown or repeated
/// parts and broken encodings are `invalid_request`.
pub(crate) async fn read_create_gram_form(
    mut payload: Multipart,
    max_picture_bytes: usize,
) -> Result<CreateGramInput, Error> {
    let mut message: Option<String> = None;
    let mut picture: Option<Option<PictureUpload>> = None;

    let mut seen_part = false;
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            // A body with no parts never reaches a delimiter the reader accepts.
            Err(MultipartError::Incomplete) if !seen_part => break,
            Err(error) => return Err(malformed_body_error(error)),
        };
        seen_part = true;
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            MESSAGE_FIELD => {
                if message.is_some() {
                    return Err(duplicate_field_error(MESSAGE_FIELD));
                }
                let bytes = read_capped(&mut field, MAX_MESSAGE_BYTES + 1).await?;
                if bytes.len() > MAX_MESSAGE_BYTES {
                    return Err(too_long_error(MESSAGE_FIELD, MAX_MESSAGE_BYTES));
                }
                let text =
                    String::from_utf8(bytes).map_err(|_| invalid_encoding_error(MESSAGE_FIELD))?;
                message = Some(text);
            }
            PICTURE_FIELD => {
                if picture.is_some() {
                    return Err(duplicate_field_error(PICTURE_FIELD));
                }
                picture = Some(read_picture(&mut field, max_picture_bytes).await?);
            }
            other => return Err(unknown_field_error(other)),
        }
    }

    Ok(CreateGramInput {
        message: message.unwrap_or_default(),
        picture: picture.flatten(),
    })
}
