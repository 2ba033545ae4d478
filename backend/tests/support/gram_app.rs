//! In-memory application harness shared by the gram integration suites.
//!
//! Each suite builds the real route table over [`InMemoryGramStore`] and
//! [`InMemoryPictureStore`], signs in through `POST /users/sign_in` as one of
//! the development accounts, and talks to the app with
//! `actix_web::test` requests.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::{CONTENT_TYPE, LOCATION};
use actix_web::{App, test, web};
use mockable::DefaultClock;
use serde_json::Value;

use grammable::Trace;
use grammable::inbound::http::health::HealthState;
use grammable::inbound::http::routes::configure;
use grammable::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use grammable::inbound::http::state::{HttpAdapters, HttpState};
use grammable::inbound::http::validation::json_config;
use grammable::outbound::accounts::StaticAccounts;
use grammable::outbound::memory::{InMemoryGramStore, InMemoryPictureStore};

const BOUNDARY: &str = "grammable-integration-boundary";

/// Smallest byte string the tests upload as a PNG.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nintegration";

/// Shared state for one test: adapters survive across rebuilt services.
pub struct GramApp {
    pub state: web::Data<HttpState>,
    pub health: web::Data<HealthState>,
    pub pictures: Arc<InMemoryPictureStore>,
    session: SessionSettings,
}

impl GramApp {
    pub fn new() -> Self {
        Self::with_max_picture_bytes(grammable::domain::DEFAULT_MAX_PICTURE_BYTES)
    }

    pub fn with_max_picture_bytes(max_picture_bytes: usize) -> Self {
        let store = Arc::new(InMemoryGramStore::new());
        let pictures = Arc::new(InMemoryPictureStore::new());
        let state = HttpState::from_adapters(HttpAdapters {
            grams: store.clone(),
            comments: store,
            pictures: pictures.clone(),
            login: Arc::new(StaticAccounts::development()),
            clock: Arc::new(DefaultClock),
            max_picture_bytes,
        });
        Self {
            state: web::Data::new(state),
            health: web::Data::new(HealthState::new()),
            pictures,
            session: SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
        }
    }

    /// The production route table with test session settings.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.health.clone())
            .app_data(self.state.clone())
            .app_data(json_config())
            .wrap(self.session.middleware())
            .wrap(Trace)
            .configure(configure)
    }
}

/// A `multipart/form-data` body for the new-gram form.
pub fn gram_form(message: Option<&str>, picture: Option<(&str, &[u8])>) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    if let Some(message) = message {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"message\"\r\n\r\n{message}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((content_type, bytes)) = picture {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"picture\"; filename=\"upload\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// `POST /grams` carrying the given form.
pub fn create_gram_request(
    message: Option<&str>,
    picture: Option<(&str, &[u8])>,
) -> test::TestRequest {
    let (content_type, body) = gram_form(message, picture);
    test::TestRequest::post()
        .uri("/grams")
        .insert_header((CONTENT_TYPE, content_type))
        .set_payload(body)
}

/// `POST /users/sign_in` for a development account.
pub fn sign_in_request(username: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/users/sign_in")
        .set_json(serde_json::json!({"username": username, "password": "password"}))
}

/// The session cookie set on a response, if any.
pub fn session_cookie(res: &ServiceResponse) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

pub fn location(res: &ServiceResponse) -> Option<String> {
    res.headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Find the listed gram with the given message.
pub fn find_gram<'a>(listing: &'a Value, message: &str) -> Option<&'a Value> {
    listing
        .as_array()?
        .iter()
        .find(|gram| gram["message"] == message)
}
