//! In-process adapters used when no database is configured and by tests.
//!
//! [`InMemoryGramStore`] implements both repository ports over one lock so
//! deleting a gram drops its comments in the same critical section.
//! [`InMemoryPictureStore`] keeps picture bytes in a map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, GramRepository, GramRepositoryError, PictureStore,
    PictureStoreError,
};
use crate::domain::{Comment, Gram, GramMessage, PictureKey};

#[derive(Default)]
struct GramState {
    /// Grams stored without comments; comments are attached on read.
    grams: HashMap<Uuid, Gram>,
    comments: Vec<Comment>,
}

impl GramState {
    fn hydrate(&self, gram: &Gram) -> Gram {
        let attached = self
            .comments
            .iter()
            .filter(|comment| comment.gram_id() == gram.id())
            .cloned()
            .collect();
        gram.clone().with_comments(attached)
    }
}

/// Gram and comment storage held in memory.
///
/// Clones share the same underlying state.
#[derive(Clone, Default)]
pub struct InMemoryGramStore {
    state: Arc<Mutex<GramState>>,
}

impl InMemoryGramStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, GramState>> {
        self.state.lock().ok()
    }
}

fn poisoned_gram_store() -> GramRepositoryError {
    GramRepositoryError::query("in-memory gram store lock poisoned")
}

fn poisoned_comment_store() -> CommentRepositoryError {
    CommentRepositoryError::query("in-memory gram store lock poisoned")
}

#[async_trait]
impl GramRepository for InMemoryGramStore {
    async fn list(&self) -> Result<Vec<Gram>, GramRepositoryError> {
        let state = self.lock().ok_or_else(poisoned_gram_store)?;
        let mut grams: Vec<Gram> = state.grams.values().map(|gram| state.hydrate(gram)).collect();
        grams.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().cmp(&left.id()))
        });
        Ok(grams)
    }

    async fn find_by_id(&self, gram_id: &Uuid) -> Result<Option<Gram>, GramRepositoryError> {
        let state = self.lock().ok_or_else(poisoned_gram_store)?;
        Ok(state.grams.get(gram_id).map(|gram| state.hydrate(gram)))
    }

    async fn insert(&self, gram: &Gram) -> Result<(), GramRepositoryError> {
        let mut state = self.lock().ok_or_else(poisoned_gram_store)?;
        if state.grams.contains_key(&gram.id()) {
            return Err(GramRepositoryError::query("duplicate gram id"));
        }
        state
            .grams
            .insert(gram.id(), gram.clone().with_comments(Vec::new()));
        Ok(())
    }

    async fn update_message(
        &self,
        gram_id: &Uuid,
        message: &GramMessage,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, GramRepositoryError> {
        let mut state = self.lock().ok_or_else(poisoned_gram_store)?;
        let Some(existing) = state.grams.remove(gram_id) else {
            return Ok(false);
        };
        state.grams.insert(
            *gram_id,
            existing.with_message(message.clone(), updated_at),
        );
        Ok(true)
    }

    async fn delete(&self, gram_id: &Uuid) -> Result<bool, GramRepositoryError> {
        let mut state = self.lock().ok_or_else(poisoned_gram_store)?;
        if state.grams.remove(gram_id).is_none() {
            return Ok(false);
        }
        state.comments.retain(|comment| comment.gram_id() != *gram_id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for InMemoryGramStore {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        let mut state = self.lock().ok_or_else(poisoned_comment_store)?;
        if !state.grams.contains_key(&comment.gram_id()) {
            return Err(CommentRepositoryError::missing_gram(comment.gram_id()));
        }
        state.comments.push(comment.clone());
        Ok(())
    }
}

/// Picture bytes held in memory.
#[derive(Clone, Default)]
pub struct InMemoryPictureStore {
    pictures: Arc<Mutex<HashMap<PictureKey, Vec<u8>>>>,
}

impl InMemoryPictureStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pictures.
    pub fn len(&self) -> usize {
        self.pictures.lock().map(|pictures| pictures.len()).unwrap_or(0)
    }

    /// True when no pictures are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned_picture_store() -> PictureStoreError {
    PictureStoreError::io("in-memory picture store lock poisoned")
}

#[async_trait]
impl PictureStore for InMemoryPictureStore {
    async fn store(&self, key: &PictureKey, bytes: &[u8]) -> Result<(), PictureStoreError> {
        let mut pictures = self.pictures.lock().map_err(|_| poisoned_picture_store())?;
        pictures.insert(key.clone(), bytes.to_vec());
        Ok(())
    }

    async fn load(&self, key: &PictureKey) -> Result<Vec<u8>, PictureStoreError> {
        let pictures = self.pictures.lock().map_err(|_| poisoned_picture_store())?;
        pictures
            .get(key)
            .cloned()
            .ok_or_else(|| PictureStoreError::not_found(key.as_str()))
    }

    async fn remove(&self, key: &PictureKey) -> Result<(), PictureStoreError> {
        let mut pictures = self.pictures.lock().map_err(|_| poisoned_picture_store())?;
        pictures.remove(key);
        Ok(())
    }
}
