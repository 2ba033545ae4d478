//! Grammable backend library.
//!
//! Users post grams (a message with a picture), other users comment on
//! them, and owners edit or delete their own grams. The crate is laid out as
//! ports and adapters: [`domain`] holds the rules, [`inbound`] adapts HTTP
//! onto the driving ports and [`outbound`] implements the driven ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
