//! Port for storing uploaded picture bytes.

use async_trait::async_trait;

use crate::domain::PictureKey;

use super::define_port_error;

define_port_error! {
    /// Errors raised by picture store adapters.
    pub enum PictureStoreError {
        /// No picture is stored under the key.
        NotFound { key: String } => "picture {key} not found",
        /// The backing storage failed.
        Io { message: String } => "picture storage failed: {message}",
    }
}

/// Port for the binary side of a gram's picture.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PictureStore: Send + Sync {
    /// Write the bytes under the given key.
    async fn store(&self, key: &PictureKey, bytes: &[u8]) -> Result<(), PictureStoreError>;

    /// Read the bytes stored under the key.
    async fn load(&self, key: &PictureKey) -> Result<Vec<u8>, PictureStoreError>;

    /// Remove the picture. Removing a missing picture is not an error.
    async fn remove(&self, key: &PictureKey) -> Result<(), PictureStoreError>;
}
