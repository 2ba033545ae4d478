//! HTTP inbound adapter exposing the gram endpoints.

pub mod cache_control;
pub mod comments;
pub mod error;
pub mod grams;
pub mod health;
mod multipart;
pub mod pictures;
pub mod redirect;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
