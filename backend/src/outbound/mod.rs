//! Outbound adapters implementing the driven domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process repositories and picture storage.
//! - **filesystem**: picture storage in an upload directory.
//! - **accounts**: the static account list behind `LoginService`.
//!
//! Adapters translate between domain types and infrastructure types. They
//! contain no business rules.

pub mod accounts;
pub mod filesystem;
pub mod memory;
pub mod persistence;
