//! Gram aggregate: a message, a picture and the comments attached to it.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Comment, UserId};

/// Default ceiling for uploaded pictures (5 MiB).
pub const DEFAULT_MAX_PICTURE_BYTES: usize = 5 * 1024 * 1024;

/// Field-level reasons a gram input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GramValidationError {
    /// The message is empty once trimmed.
    #[error("message can't be blank")]
    BlankMessage,
    /// No picture bytes were supplied.
    #[error("picture can't be blank")]
    MissingPicture,
    /// The picture content type is not an accepted image format.
    #[error("picture type {content_type} is not allowed")]
    UnsupportedPictureType { content_type: String },
    /// The picture exceeds the configured size ceiling.
    #[error("picture is larger than the {max} byte limit")]
    PictureTooLarge { size: usize, max: usize },
}

impl GramValidationError {
    /// Name of the input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankMessage => "message",
            Self::MissingPicture
            | Self::UnsupportedPictureType { .. }
            | Self::PictureTooLarge { .. } => "picture",
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankMessage | Self::MissingPicture => "blank",
            Self::UnsupportedPictureType { .. } => "unsupported_type",
            Self::PictureTooLarge { .. } => "too_large",
        }
    }
}

/// Gram message text.
///
/// ## Invariants
/// - Non-empty once trimmed. The caller's text is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GramMessage(String);

impl GramMessage {
    /// Validate and wrap a message.
    ///
    /// # Examples
    /// ```
    /// use grammable::domain::GramMessage;
    ///
    /// assert!(GramMessage::new("hello").is_ok());
    /// assert!(GramMessage::new("   ").is_err());
    /// ```
    pub fn new(message: impl Into<String>) -> Result<Self, GramValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(GramValidationError::BlankMessage);
        }
        Ok(Self(message))
    }
}

impl AsRef<str> for GramMessage {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GramMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<GramMessage> for String {
    fn from(value: GramMessage) -> Self {
        value.0
    }
}

impl TryFrom<String> for GramMessage {
    type Error = GramValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Accepted picture encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureFormat {
    Jpeg,
    Png,
    Gif,
}

impl PictureFormat {
    /// Map a MIME type onto an accepted format.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Infer the format from a stored key's extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// File extension used for stored keys.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
        }
    }

    /// Canonical MIME type served back to clients.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

/// Errors returned when parsing a [`PictureKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("picture key {0:?} is not a stored picture name")]
pub struct PictureKeyError(String);

static PICTURE_KEY_RE: OnceLock<Regex> = OnceLock::new();

fn picture_key_regex() -> &'static Regex {
    PICTURE_KEY_RE.get_or_init(|| {
        // 32 hex digits (simple UUID) plus one of the accepted extensions.
        Regex::new("^[0-9a-f]{32}\\.(jpg|png|gif)$")
            .unwrap_or_else(|error| panic!("picture key regex failed to compile: {error}"))
    })
}

/// Reference to a stored picture.
///
/// Keys are flat file names so they are safe to join onto a storage root and
/// to embed in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PictureKey(String);

impl PictureKey {
    /// Generate a fresh key for a picture of the given format.
    pub fn generate(format: PictureFormat) -> Self {
        Self(format!("{}.{}", Uuid::new_v4().simple(), format.extension()))
    }

    /// Validate an existing key.
    ///
    /// # Examples
    /// ```
    /// use grammable::domain::PictureKey;
    ///
    /// assert!(PictureKey::parse("0123456789abcdef0123456789abcdef.png").is_ok());
    /// assert!(PictureKey::parse("../etc/passwd").is_err());
    /// ```
    pub fn parse(raw: impl Into<String>) -> Result<Self, PictureKeyError> {
        let raw = raw.into();
        if picture_key_regex().is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(PictureKeyError(raw))
        }
    }

    /// Format implied by the key's extension.
    pub fn format(&self) -> Option<PictureFormat> {
        self.0
            .rsplit_once('.')
            .and_then(|(_, extension)| PictureFormat::from_extension(extension))
    }

    /// Borrow the key as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PictureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PictureKey> for String {
    fn from(value: PictureKey) -> Self {
        value.0
    }
}

impl TryFrom<String> for PictureKey {
    type Error = PictureKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Raw picture upload as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PictureUpload {
    /// Check the upload against the accepted formats and the size ceiling.
    pub fn validate(&self, max_bytes: usize) -> Result<PictureFormat, GramValidationError> {
        if self.bytes.is_empty() {
            return Err(GramValidationError::MissingPicture);
        }
        let format = PictureFormat::from_content_type(&self.content_type).ok_or_else(|| {
            GramValidationError::UnsupportedPictureType {
                content_type: self.content_type.clone(),
            }
        })?;
        if self.bytes.len() > max_bytes {
            return Err(GramValidationError::PictureTooLarge {
                size: self.bytes.len(),
                max: max_bytes,
            });
        }
        Ok(format)
    }
}

/// Input required to build a [`Gram`].
#[derive(Debug, Clone)]
pub struct GramDraft {
    pub id: Uuid,
    pub message: GramMessage,
    pub picture: PictureKey,
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A posted picture with its message.
///
/// ## Invariants
/// - `message` is non-empty and `picture` is present (enforced by their types).
/// - `owner` never changes after construction.
/// - `comments` are ordered oldest first and all reference this gram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gram {
    id: Uuid,
    message: GramMessage,
    picture: PictureKey,
    owner: UserId,
    comments: Vec<Comment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Gram {
    /// Build a gram without comments.
    pub fn new(draft: GramDraft) -> Self {
        let GramDraft {
            id,
            message,
            picture,
            owner,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            message,
            picture,
            owner,
            comments: Vec::new(),
            created_at,
            updated_at,
        }
    }

    /// Attach comments loaded alongside the gram.
    ///
    /// Comments belonging to other grams are dropped.
    #[must_use]
    pub fn with_comments(mut self, mut comments: Vec<Comment>) -> Self {
        comments.retain(|comment| comment.gram_id() == self.id);
        comments.sort_by_key(Comment::created_at);
        self.comments = comments;
        self
    }

    /// Replace the message, bumping `updated_at`.
    #[must_use]
    pub fn with_message(mut self, message: GramMessage, updated_at: DateTime<Utc>) -> Self {
        self.message = message;
        self.updated_at = updated_at;
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Validated message text.
    pub fn message(&self) -> &GramMessage {
        &self.message
    }

    /// Storage key of the attached picture.
    pub fn picture(&self) -> &PictureKey {
        &self.picture
    }

    /// User who posted the gram.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Attached comments, oldest first.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Time the gram was posted.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last message edit, or creation when never edited.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
