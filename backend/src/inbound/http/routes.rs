//! Route table for the gram application.
//!
//! `/grams/new` is registered ahead of `/grams/{id}` so the literal segment
//! wins.

use actix_web::web;

use super::comments::create_comment;
use super::grams::{create_gram, destroy_gram, edit_gram, index, new_gram, show_gram, update_gram};
use super::health::{live, ready};
use super::pictures::show_picture;
use super::users::{sign_in, sign_in_form, sign_out};

/// Register every handler. Callers supply the session middleware and the
/// [`HttpState`](super::state::HttpState) and
/// [`HealthState`](super::health::HealthState) app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use grammable::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(new_gram)
        .service(create_gram)
        .service(show_gram)
        .service(edit_gram)
        .service(update_gram)
        .service(destroy_gram)
        .service(create_comment)
        .service(show_picture)
        .service(sign_in_form)
        .service(sign_in)
        .service(sign_out)
        .service(ready)
        .service(live);
}
