//! Comments left on grams.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::UserId;

/// Input required to build a [`Comment`].
#[derive(Debug, Clone)]
pub struct CommentDraft {
    pub id: Uuid,
    pub gram_id: Uuid,
    pub author: UserId,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A message attached to a gram by a signed-in user.
///
/// Comments are immutable and only disappear together with their gram.
/// The message is stored as given; no presence check is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: Uuid,
    gram_id: Uuid,
    author: UserId,
    message: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(draft: CommentDraft) -> Self {
        let CommentDraft {
            id,
            gram_id,
            author,
            message,
            created_at,
        } = draft;
        Self {
            id,
            gram_id,
            author,
            message,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn gram_id(&self) -> Uuid {
        self.gram_id
    }

    pub fn author(&self) -> &UserId {
        &self.author
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
