//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{HttpResponse, web};

use crate::domain::ports::{
    MockCommentCommand, MockGramCommand, MockGramQuery, MockLoginService, MockPictureStore,
};
use crate::domain::{DEFAULT_MAX_PICTURE_BYTES, Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::state::HttpState;

/// Route that signs the session in as the user id in the path.
pub const TEST_SIGN_IN_PATH: &str = "/test/sign-in";

/// Cookie session middleware with a fresh key, named `session`, without the
/// `Secure` flag so plain-HTTP test requests keep it.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

async fn sign_in_as(session: SessionContext, path: web::Path<String>) -> Result<HttpResponse, Error> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the test-only sign-in route.
pub fn test_sign_in_route(cfg: &mut web::ServiceConfig) {
    cfg.route(
        &format!("{TEST_SIGN_IN_PATH}/{{user_id}}"),
        web::get().to(sign_in_as),
    );
}

/// Mocks behind every port, ready for expectations.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub grams_query: MockGramQuery,
    pub grams: MockGramCommand,
    pub comments: MockCommentCommand,
    pub pictures: MockPictureStore,
}

impl MockPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            grams_query: Arc::new(self.grams_query),
            grams: Arc::new(self.grams),
            comments: Arc::new(self.comments),
            pictures: Arc::new(self.pictures),
            max_picture_bytes: DEFAULT_MAX_PICTURE_BYTES,
        }
    }
}

/// Build a test service from [`MockPorts`] with sessions, JSON config and
/// the test sign-in route, then register the given handlers.
macro_rules! mock_app {
    ($ports:expr, $($service:expr),+ $(,)?) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap($crate::inbound::http::test_utils::test_session_middleware())
                .app_data(actix_web::web::Data::new($ports.into_state()))
                .app_data($crate::inbound::http::validation::json_config())
                .configure($crate::inbound::http::test_utils::test_sign_in_route)
                $(.service($service))+,
        )
    };
}
pub(crate) use mock_app;

/// Sign the test app in as `user` and return the session cookie.
macro_rules! session_cookie_for {
    ($app:expr, $user:expr) => {{
        let uri = format!(
            "{}/{}",
            $crate::inbound::http::test_utils::TEST_SIGN_IN_PATH,
            $user
        );
        let res = actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::get().uri(&uri).to_request(),
        )
        .await;
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == $crate::inbound::http::session_config::SESSION_COOKIE_NAME)
            .map(actix_web::cookie::Cookie::into_owned)
            .expect("session cookie set")
    }};
}
pub(crate) use session_cookie_for;
