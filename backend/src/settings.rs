//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from `GRAMMABLE_*` environment variables, a
//! configuration file or command-line flags. Size limits carry their
//! defaults in the struct; the remaining values fall back in the accessors.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_MAX_PICTURE_BYTES;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Top-level configuration for the grammable server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GRAMMABLE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL. Without one the server keeps grams in memory.
    pub database_url: Option<String>,
    /// Directory for uploaded pictures. Without one pictures stay in memory.
    pub upload_dir: Option<PathBuf>,
    /// Largest accepted picture, in bytes.
    #[ortho_config(default = DEFAULT_MAX_PICTURE_BYTES)]
    pub max_upload_bytes: usize,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_DB_MAX_CONNECTIONS)]
    pub db_max_connections: u32,
}

impl AppSettings {
    /// Configured bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn upload_dir(&self) -> Option<&Path> {
        self.upload_dir.as_deref()
    }

    /// Picture size limit, defaulting to 5 MiB. Zero is treated as unset.
    pub fn max_upload_bytes(&self) -> usize {
        match self.max_upload_bytes {
            0 => DEFAULT_MAX_PICTURE_BYTES,
            bytes => bytes,
        }
    }

    /// Pool size, defaulting to 10. Zero is treated as unset.
    pub fn db_max_connections(&self) -> u32 {
        match self.db_max_connections {
            0 => DEFAULT_DB_MAX_CONNECTIONS,
            connections => connections,
        }
    }
}
