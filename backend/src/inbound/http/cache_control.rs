//! Shared cache-control policies for HTTP handlers.

/// Picture keys are random and never rewritten, so stored bytes never change.
pub const PUBLIC_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the cache-control header tuple for picture responses.
pub const fn immutable_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_IMMUTABLE)
}
