//! Picture store backed by a directory on disk.
//!
//! All access goes through a capability-scoped [`cap_std::fs::Dir`], so keys
//! can only ever resolve inside the upload directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};

use crate::domain::PictureKey;
use crate::domain::ports::{PictureStore, PictureStoreError};

/// Errors raised while opening the upload directory.
#[derive(Debug, thiserror::Error)]
#[error("failed to open upload directory {path}: {source}")]
pub struct UploadDirError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
}

/// Filesystem implementation of the [`PictureStore`] port.
#[derive(Clone)]
pub struct FilesystemPictureStore {
    dir: Arc<Dir>,
}

impl FilesystemPictureStore {
    /// Open (creating if needed) the upload directory.
    ///
    /// # Errors
    ///
    /// Returns [`UploadDirError`] when the directory cannot be created or
    /// opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, UploadDirError> {
        let path = path.as_ref();
        let wrap = |source| UploadDirError {
            path: path.to_path_buf(),
            source,
        };
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(wrap)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(wrap)?;
        Ok(Self { dir: Arc::new(dir) })
    }

    async fn blocking<T, F>(&self, task: F) -> Result<T, PictureStoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> Result<T, PictureStoreError> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || task(&dir))
            .await
            .map_err(|err| PictureStoreError::io(format!("picture task failed: {err}")))?
    }
}

fn io_error(key: &str, error: &std::io::Error) -> PictureStoreError {
    PictureStoreError::io(format!("{key}: {}", error.kind()))
}

#[async_trait]
impl PictureStore for FilesystemPictureStore {
    async fn store(&self, key: &PictureKey, bytes: &[u8]) -> Result<(), PictureStoreError> {
        let key = key.as_str().to_owned();
        let bytes = bytes.to_vec();
        self.blocking(move |dir| {
            // Write under a temporary name first so readers never see a partial file.
            let staging = format!(".{key}.partial");
            dir.write(&staging, &bytes)
                .map_err(|error| io_error(&key, &error))?;
            dir.rename(&staging, dir, &key)
                .map_err(|error| io_error(&key, &error))
        })
        .await
    }

    async fn load(&self, key: &PictureKey) -> Result<Vec<u8>, PictureStoreError> {
        let key = key.as_str().to_owned();
        self.blocking(move |dir| match dir.read(&key) {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Err(PictureStoreError::not_found(key))
            }
            Err(error) => Err(io_error(&key, &error)),
        })
        .await
    }

    async fn remove(&self, key: &PictureKey) -> Result<(), PictureStoreError> {
        let key = key.as_str().to_owned();
        self.blocking(move |dir| match dir.remove_file(&key) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(io_error(&key, &error)),
        })
        .await
    }
}
