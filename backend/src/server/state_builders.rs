//! Builders that pick storage adapters and assemble the HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use grammable::domain::ports::PictureStore;
use grammable::inbound::http::state::{HttpAdapters, HttpState};
use grammable::outbound::accounts::StaticAccounts;
use grammable::outbound::filesystem::FilesystemPictureStore;
use grammable::outbound::memory::{InMemoryGramStore, InMemoryPictureStore};
use grammable::outbound::persistence::{DieselCommentRepository, DieselGramRepository};

use super::ServerConfig;

/// Build the handler state from the configured adapters.
///
/// Pictures go to the upload directory when one is configured and stay in
/// memory otherwise; grams go to PostgreSQL when a pool is configured.
///
/// # Errors
/// Returns [`std::io::Error`] when the upload directory cannot be opened.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.upload_dir {
        Some(dir) => {
            let store = FilesystemPictureStore::open(dir).map_err(std::io::Error::other)?;
            info!(upload_dir = %dir.display(), "storing pictures on disk");
            Ok(with_pictures(config, Arc::new(store)))
        }
        None => {
            info!("storing pictures in memory");
            Ok(with_pictures(config, Arc::new(InMemoryPictureStore::new())))
        }
    }
}

fn with_pictures<P>(config: &ServerConfig, pictures: Arc<P>) -> HttpState
where
    P: PictureStore + 'static,
{
    let login = Arc::new(StaticAccounts::development());
    let clock = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => HttpState::from_adapters(HttpAdapters {
            grams: Arc::new(DieselGramRepository::new(pool.clone())),
            comments: Arc::new(DieselCommentRepository::new(pool.clone())),
            pictures,
            login,
            clock,
            max_picture_bytes: config.max_picture_bytes,
        }),
        None => {
            info!("no database configured; grams are kept in memory");
            let store = Arc::new(InMemoryGramStore::new());
            HttpState::from_adapters(HttpAdapters {
                grams: store.clone(),
                comments: store,
                pictures,
                login,
                clock,
                max_picture_bytes: config.max_picture_bytes,
            })
        }
    }
}
