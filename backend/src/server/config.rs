//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use grammable::domain::DEFAULT_MAX_PICTURE_BYTES;
use grammable::inbound::http::session_config::SessionSettings;
use grammable::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) max_picture_bytes: usize,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) upload_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Configuration that keeps grams and pictures in memory.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            max_picture_bytes: DEFAULT_MAX_PICTURE_BYTES,
            db_pool: None,
            upload_dir: None,
        }
    }

    /// Store grams and comments in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Write pictures below `dir` instead of keeping them in memory.
    #[must_use]
    pub fn with_upload_dir(mut self, dir: PathBuf) -> Self {
        self.upload_dir = Some(dir);
        self
    }

    #[must_use]
    pub fn with_max_picture_bytes(mut self, max_picture_bytes: usize) -> Self {
        self.max_picture_bytes = max_picture_bytes;
        self
    }
}
